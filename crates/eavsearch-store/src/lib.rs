//! eavsearch Store - database configuration and the MySQL catalog
//!
//! Provides:
//! - `db.yaml` loading, interactive credential collection and saving
//! - `MySqlCatalog`, the `CatalogSource` backed by a single MySQL connection

pub mod config;
pub mod errors;
pub mod mysql;

// Re-export key types
pub use config::DbConnectionConfig;
pub use errors::Result;
pub use mysql::MySqlCatalog;
