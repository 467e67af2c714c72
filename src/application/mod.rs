// Application layer - Use cases and repository boundaries
pub mod glucose_repository;
pub mod render_service;
