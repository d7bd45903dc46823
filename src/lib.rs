pub mod actions;
pub mod authz;
pub mod config;
pub mod errors;
pub mod models;
pub mod repository;
pub mod seed;
pub mod storage;
pub mod utils;

// Re-export commonly used items for tests
pub use authz::Session;
pub use errors::{AppError, AppResult};
pub use repository::Repository;
