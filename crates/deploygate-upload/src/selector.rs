//! Uploader selection
//!
//! Each artifact kind has its own uploader variant. A new kind is added as a
//! new variant; selection only looks at which artifact path is configured.

use std::path::{Path, PathBuf};

use deploygate_core::config::validate_artifact_path;
use deploygate_core::{ConfigError, DeployGateOptions};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::transport::Transport;
use crate::types::{ArtifactKind, UploadRequest};

/// Uploader for Android packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApkUploader {
    path: PathBuf,
}

/// Uploader for iOS packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpaUploader {
    path: PathBuf,
}

/// The uploader strategy chosen for this invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Uploader {
    Apk(ApkUploader),
    Ipa(IpaUploader),
}

impl Uploader {
    /// Pick the uploader whose artifact option is set.
    ///
    /// Exactly one of `apk` / `ipa` must be configured; anything else is a
    /// configuration error. No network call happens here.
    pub fn select(options: &DeployGateOptions) -> Result<Self> {
        let uploader = match (&options.apk, &options.ipa) {
            (Some(apk), None) => Self::Apk(ApkUploader { path: apk.clone() }),
            (None, Some(ipa)) => Self::Ipa(IpaUploader { path: ipa.clone() }),
            (None, None) => return Err(ConfigError::NoArtifact.into()),
            (Some(apk), Some(ipa)) => {
                return Err(ConfigError::ConflictingArtifacts {
                    apk: apk.clone(),
                    ipa: ipa.clone(),
                }
                .into())
            }
        };

        debug!(
            binary = uploader.binary_name(),
            path = %uploader.artifact_path().display(),
            "selected uploader"
        );
        Ok(uploader)
    }

    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Apk(_) => ArtifactKind::Apk,
            Self::Ipa(_) => ArtifactKind::Ipa,
        }
    }

    pub fn binary_name(&self) -> &'static str {
        self.kind().binary_name()
    }

    pub fn artifact_path(&self) -> &Path {
        match self {
            Self::Apk(uploader) => &uploader.path,
            Self::Ipa(uploader) => &uploader.path,
        }
    }

    /// Build the upload request, checking the artifact file exists.
    pub fn request(&self, options: &DeployGateOptions) -> Result<UploadRequest> {
        let kind = self.kind();
        let path = self.artifact_path();
        validate_artifact_path(kind.binary_name(), path)?;

        let extension_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(kind.extension()));
        if !extension_matches {
            warn!(
                path = %path.display(),
                expected = kind.extension(),
                "artifact extension does not match its kind"
            );
        }

        Ok(UploadRequest {
            artifact_path: path.to_path_buf(),
            artifact_kind: kind,
            target_user: options.user.clone(),
            api_token: options.api_token.clone(),
            message: options.message.clone(),
            distribution_key: options.distribution_key.clone(),
            release_note: options.release_note.clone(),
        })
    }

    /// Send the request through `transport` and return the parsed answer.
    pub async fn perform_upload<T>(&self, transport: &T, request: &UploadRequest) -> Result<Value>
    where
        T: Transport + ?Sized,
    {
        if request.artifact_kind != self.kind() {
            return Err(ConfigError::InvalidValue {
                field: self.binary_name().to_string(),
                message: format!(
                    "request carries a {} artifact, expected {}",
                    request.artifact_kind,
                    self.kind()
                ),
            }
            .into());
        }

        transport.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UploadError;
    use crate::transport::testing::FakeTransport;
    use serde_json::json;
    use tempfile::TempDir;

    fn options() -> DeployGateOptions {
        DeployGateOptions {
            api_token: "token".to_string(),
            user: "alice".to_string(),
            apk: None,
            ipa: None,
            message: "No changelog provided".to_string(),
            distribution_key: Some("dk".to_string()),
            release_note: None,
            endpoint: "https://deploygate.com".to_string(),
        }
    }

    #[test]
    fn test_select_apk() {
        let mut opts = options();
        opts.apk = Some(PathBuf::from("app.apk"));

        let uploader = Uploader::select(&opts).unwrap();
        assert_eq!(uploader.kind(), ArtifactKind::Apk);
        assert_eq!(uploader.binary_name(), "apk");
        assert_eq!(uploader.artifact_path(), Path::new("app.apk"));
    }

    #[test]
    fn test_select_ipa() {
        let mut opts = options();
        opts.ipa = Some(PathBuf::from("app.ipa"));

        let uploader = Uploader::select(&opts).unwrap();
        assert_eq!(uploader.kind(), ArtifactKind::Ipa);
        assert_eq!(uploader.binary_name(), "ipa");
    }

    #[test]
    fn test_select_without_artifact() {
        let err = Uploader::select(&options()).unwrap_err();
        assert!(matches!(
            err,
            UploadError::Configuration(ConfigError::NoArtifact)
        ));
    }

    #[test]
    fn test_select_with_both_artifacts() {
        let mut opts = options();
        opts.apk = Some(PathBuf::from("app.apk"));
        opts.ipa = Some(PathBuf::from("app.ipa"));

        let err = Uploader::select(&opts).unwrap_err();
        assert!(matches!(
            err,
            UploadError::Configuration(ConfigError::ConflictingArtifacts { .. })
        ));
    }

    #[test]
    fn test_request_requires_existing_file() {
        let mut opts = options();
        opts.apk = Some(PathBuf::from("/no/such/app.apk"));

        let uploader = Uploader::select(&opts).unwrap();
        let err = uploader.request(&opts).unwrap_err();
        assert!(matches!(
            err,
            UploadError::Configuration(ConfigError::ArtifactNotFound { kind: "apk", .. })
        ));
    }

    #[test]
    fn test_request_carries_options() {
        let temp = TempDir::new().unwrap();
        let apk = temp.path().join("app.apk");
        std::fs::write(&apk, b"PK").unwrap();
        let mut opts = options();
        opts.apk = Some(apk.clone());

        let request = Uploader::select(&opts).unwrap().request(&opts).unwrap();
        assert_eq!(request.artifact_path, apk);
        assert_eq!(request.artifact_kind, ArtifactKind::Apk);
        assert_eq!(request.target_user, "alice");
        assert_eq!(request.distribution_key.as_deref(), Some("dk"));
    }

    #[tokio::test]
    async fn test_perform_upload_delegates_to_transport() {
        let temp = TempDir::new().unwrap();
        let ipa = temp.path().join("app.ipa");
        std::fs::write(&ipa, b"PK").unwrap();
        let mut opts = options();
        opts.ipa = Some(ipa);

        let uploader = Uploader::select(&opts).unwrap();
        let request = uploader.request(&opts).unwrap();
        let transport = FakeTransport::new(json!({"error": false}));

        let payload = uploader.perform_upload(&transport, &request).await.unwrap();
        assert_eq!(payload, json!({"error": false}));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_perform_upload_rejects_mismatched_request() {
        let temp = TempDir::new().unwrap();
        let apk = temp.path().join("app.apk");
        std::fs::write(&apk, b"PK").unwrap();
        let mut opts = options();
        opts.apk = Some(apk);

        let uploader = Uploader::select(&opts).unwrap();
        let mut request = uploader.request(&opts).unwrap();
        request.artifact_kind = ArtifactKind::Ipa;
        let transport = FakeTransport::new(json!({"error": false}));

        assert!(uploader.perform_upload(&transport, &request).await.is_err());
        assert_eq!(transport.calls(), 0);
    }
}
