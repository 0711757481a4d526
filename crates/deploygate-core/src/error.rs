//! Error types for configuration handling

use std::path::PathBuf;
use thiserror::Error;

use crate::config::OptionKey;

/// Result type alias using ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration-related errors
///
/// Every variant is raised before any network activity takes place.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Required option has no value from any source
    #[error("No {} for DeployGate given, pass using `--{}` or ${}", .0.description(), .0.flag(), .0.env_var())]
    MissingOption(OptionKey),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Artifact path does not point at a readable file
    #[error("Couldn't find {kind} file at path '{}'", .path.display())]
    ArtifactNotFound { kind: &'static str, path: PathBuf },

    /// Neither an APK nor an IPA was configured
    #[error("No artifact to upload: pass --apk or --ipa (or set DEPLOYGATE_APK_PATH / DEPLOYGATE_IPA_PATH)")]
    NoArtifact,

    /// Both an APK and an IPA were configured
    #[error("Both apk ('{}') and ipa ('{}') given, upload one artifact per invocation", .apk.display(), .ipa.display())]
    ConflictingArtifacts { apk: PathBuf, ipa: PathBuf },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}
