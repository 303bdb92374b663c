//! Bootstrap module for starting a christmas process
//!
//! This module handles:
//! - Configuration loading
//! - The `Initializer` capability and its database/auth implementations
//! - Reporting the library search path and process arguments
//! - Running the initializers in their fixed order

pub mod auth;
pub mod config;
pub mod database;
pub mod initializer;
pub mod runner;
pub mod search_path;

pub use auth::AuthInitializer;
pub use config::load_config;
pub use database::DatabaseInitializer;
pub use initializer::Initializer;
pub use runner::BootstrapRunner;
pub use search_path::SearchPath;
