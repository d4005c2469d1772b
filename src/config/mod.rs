/// Database configuration and connection management
pub mod database;

/// Inventory settings loading from config.toml
pub mod settings;
