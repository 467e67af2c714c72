// Domain layer - Pure decision logic, no I/O
pub mod chart;
pub mod formatting;
pub mod reading;
pub mod settings;
pub mod staleness;
