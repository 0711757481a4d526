//! Common types for the upload flow

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of build artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Android package
    Apk,
    /// iOS package
    Ipa,
}

impl ArtifactKind {
    /// Short name used in user-facing messages
    pub fn binary_name(&self) -> &'static str {
        match self {
            Self::Apk => "apk",
            Self::Ipa => "ipa",
        }
    }

    /// Expected file extension
    pub fn extension(&self) -> &'static str {
        self.binary_name()
    }

    /// Platform this artifact targets
    pub fn platform(&self) -> &'static str {
        match self {
            Self::Apk => "android",
            Self::Ipa => "ios",
        }
    }

    /// Content type of the `file` part
    pub fn mime_type(&self) -> &'static str {
        "application/octet-stream"
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary_name())
    }
}

/// One upload, built once from resolved options
#[derive(Clone)]
pub struct UploadRequest {
    /// Path to the artifact, known to exist
    pub artifact_path: PathBuf,

    /// Kind derived from which path was configured
    pub artifact_kind: ArtifactKind,

    /// Target username or organization name
    pub target_user: String,

    /// DeployGate API token
    pub api_token: String,

    /// Release notes
    pub message: String,

    /// Target distribution key
    pub distribution_key: Option<String>,

    /// Release note for the distribution page
    pub release_note: Option<String>,
}

impl std::fmt::Debug for UploadRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadRequest")
            .field("artifact_path", &self.artifact_path)
            .field("artifact_kind", &self.artifact_kind)
            .field("target_user", &self.target_user)
            .field("api_token", &"********")
            .field("message", &self.message)
            .field("distribution_key", &self.distribution_key)
            .field("release_note", &self.release_note)
            .finish()
    }
}

/// Successful upload as reported by DeployGate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Base URL joined with `results.path`
    pub distribution_url: String,

    /// Service-assigned revision, increasing per application
    pub revision: i64,

    /// The full `results` document
    pub app_info: Value,

    /// When the response was interpreted
    pub uploaded_at: DateTime<Utc>,
}

/// Category of a service-reported failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// API token rejected
    NotAuthenticated,
    /// Wrong user or not allowed to update the app
    PermitDenied,
    /// Plan limit reached or plan expired
    PlanLimit,
    /// Anything else
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::NotAuthenticated => write!(f, "Not Authenticated"),
            ErrorCategory::PermitDenied => write!(f, "Permit Denied"),
            ErrorCategory::PlanLimit => write!(f, "Plan Limit"),
            ErrorCategory::Unknown => write!(f, "Unknown"),
        }
    }
}
