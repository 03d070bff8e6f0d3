//! # Faculty Config
//!
//! Configuration types loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`sync`]: Rank synchronization policy
//!
//! # Example
//!
//! ```ignore
//! use faculty_config::{DatabaseConfig, SyncConfig};
//!
//! dotenvy::dotenv().ok();
//! let sync_config = SyncConfig::from_env()?;
//! let database_config = DatabaseConfig::from_env()?;
//! ```

pub mod database;
pub mod sync;

pub use database::{ConfigError, DatabaseConfig};
pub use sync::{MissingPermissionPolicy, SyncConfig};
