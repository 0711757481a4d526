//! The DeployGate upload action

use deploygate_core::config::validate_options;
use deploygate_core::{DeployGateOptions, ResultPublisher};
use tracing::{info, warn};

use crate::error::{Result, UploadError};
use crate::reporter::Reporter;
use crate::response::ResponseInterpreter;
use crate::selector::Uploader;
use crate::transport::Transport;
use crate::types::{ArtifactKind, UploadResult};

/// Whether builds for `platform` can be uploaded
pub fn is_supported(platform: &str) -> bool {
    [ArtifactKind::Apk, ArtifactKind::Ipa]
        .iter()
        .any(|kind| kind.platform().eq_ignore_ascii_case(platform))
}

/// Upload a build to DeployGate
///
/// One [`run`](Self::run) performs a single upload attempt: validation and
/// uploader selection, one request, then interpretation of the answer.
pub struct DeployGateAction<T, R> {
    transport: T,
    reporter: R,
}

impl<T: Transport, R: Reporter> DeployGateAction<T, R> {
    pub fn new(transport: T, reporter: R) -> Self {
        Self {
            transport,
            reporter,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Run the upload.
    ///
    /// Configuration problems are reported before the transport is touched.
    /// A rejected upload surfaces as [`UploadError::UploadFailed`].
    pub async fn run(
        &self,
        options: &DeployGateOptions,
        publisher: &mut dyn ResultPublisher,
    ) -> Result<UploadResult> {
        validate_options(options)?;
        let uploader = Uploader::select(options)?;
        let request = uploader.request(options)?;
        let binary = uploader.binary_name();

        self.reporter.success(&format!(
            "Starting with {} upload to DeployGate... this could take some time ⏳",
            binary
        ));

        let payload = uploader.perform_upload(&self.transport, &request).await?;

        let interpreter = ResponseInterpreter::new(&options.endpoint, binary);
        match interpreter.interpret(&payload, publisher, &self.reporter) {
            Ok(result) => {
                self.reporter
                    .message(&format!("DeployGate URL: {}", result.distribution_url));
                self.reporter.success(&format!(
                    "Build successfully uploaded to DeployGate as revision #{}!",
                    result.revision
                ));
                info!(binary, revision = result.revision, "upload finished");
                Ok(result)
            }
            Err(e) => {
                warn!(binary, error = %e, "upload rejected");
                Err(UploadError::UploadFailed {
                    binary,
                    source: Box::new(e),
                })
            }
        }
    }
}
