//! Exit codes for the CLI

use deploygate_core::ConfigError;
use deploygate_upload::{ErrorKind, UploadError};

/// Success
#[allow(dead_code)]
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error, nothing was sent
pub const CONFIG_ERROR: i32 = 2;

/// Network, TLS or malformed response
pub const TRANSPORT_ERROR: i32 = 3;

/// DeployGate rejected the upload or answered with an unknown document
pub const SERVICE_ERROR: i32 = 4;

/// Map a command failure to its exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(upload) = err.downcast_ref::<UploadError>() {
        return match upload.kind() {
            ErrorKind::Configuration => CONFIG_ERROR,
            ErrorKind::Transport => TRANSPORT_ERROR,
            ErrorKind::Service | ErrorKind::UnexpectedResponse => SERVICE_ERROR,
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    ERROR
}

/// User-facing text for a command failure
///
/// A rejected upload is shown by its top-level message only; the service
/// message and hint were already reported while interpreting the response.
pub fn describe(err: &anyhow::Error) -> String {
    match err.downcast_ref::<UploadError>() {
        Some(upload) if matches!(upload, UploadError::UploadFailed { .. }) => upload.to_string(),
        _ => format!("{:#}", err),
    }
}
