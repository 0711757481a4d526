//! Upload error types

use deploygate_core::ConfigError;
use thiserror::Error;

use crate::types::ErrorCategory;

/// Upload-related errors
#[derive(Debug, Error)]
pub enum UploadError {
    /// Missing or invalid input, raised before any network activity
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Network or TLS failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not a JSON object
    #[error("Malformed response from DeployGate (HTTP {status}): {message}")]
    MalformedResponse { status: u16, message: String },

    /// IO error while reading the artifact
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// DeployGate answered with `error: true`
    #[error("Error uploading to DeployGate: {message}")]
    Service {
        message: String,
        category: ErrorCategory,
    },

    /// DeployGate answered with a document of unknown shape
    #[error("Error uploading to DeployGate: {payload}")]
    UnexpectedResponse { payload: String },

    /// The upload was rejected; wraps the interpreter's failure
    #[error("Error when trying to upload {binary} to DeployGate")]
    UploadFailed {
        binary: &'static str,
        #[source]
        source: Box<UploadError>,
    },
}

/// Coarse error taxonomy used for exit codes and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Service,
    UnexpectedResponse,
}

impl UploadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Http(_) | Self::MalformedResponse { .. } | Self::Io(_) => ErrorKind::Transport,
            Self::Service { .. } => ErrorKind::Service,
            Self::UnexpectedResponse { .. } => ErrorKind::UnexpectedResponse,
            Self::UploadFailed { source, .. } => source.kind(),
        }
    }

    /// Category of a service-level failure
    ///
    /// Unrecognized service messages and unexpected documents are
    /// [`ErrorCategory::Unknown`]; configuration and transport errors have no
    /// category.
    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Self::Service { category, .. } => Some(*category),
            Self::UnexpectedResponse { .. } => Some(ErrorCategory::Unknown),
            Self::UploadFailed { source, .. } => source.category(),
            _ => None,
        }
    }
}

/// Result type for upload operations
pub type Result<T> = std::result::Result<T, UploadError>;
