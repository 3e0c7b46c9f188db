//! Host configuration: supported languages, key separator and artifact location.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    ArtifactConfig,
    ConfigError,
    DirectorySettings,
    ValidationError,
};
