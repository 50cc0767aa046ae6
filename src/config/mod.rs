//! Configuration for storage, sync intervals and logging.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LoggingConfig, StorageConfig, StorageKind, SyncConfig};
