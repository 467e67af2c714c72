// Presentation layer - HTTP surface and page rendering
pub mod app_state;
pub mod client_script;
pub mod handlers;
pub mod templates;
