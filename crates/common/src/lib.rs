/// Shared types for the onion alias workspace
///
/// Holds the alias/address value types, the error taxonomy and the
/// on-disk configuration used by the registry and the daemon.

pub mod config;
pub mod error;
pub mod types;

pub use config::{defaults, AliasConfig, ApiConfig, ConfigError};
pub use error::{AliasError, ServiceError};
pub use types::{Alias, OnionAddress};
