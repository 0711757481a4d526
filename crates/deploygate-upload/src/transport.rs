//! Upload transport
//!
//! Performs exactly one multipart POST per upload. There is no retry: any
//! network, TLS or decoding failure is returned to the caller as is.

use deploygate_core::config::validate_endpoint;
use deploygate_core::{ConfigError, OptionKey};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde_json::Value;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};
use url::Url;

use crate::error::{Result, UploadError};
use crate::types::UploadRequest;

/// Number of body bytes quoted when a response cannot be decoded
const BODY_SNIPPET_LEN: usize = 200;

/// Sends an upload request and returns the decoded JSON answer
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &UploadRequest) -> Result<Value>;
}

/// DeployGate HTTP client
pub struct DeployGateClient {
    base_url: Url,
    client: Client,
}

impl DeployGateClient {
    /// Create a client for the service at `endpoint`
    ///
    /// The endpoint must use `https`, except for loopback hosts.
    pub fn new(endpoint: &str) -> Result<Self> {
        let base_url = validate_endpoint(endpoint)?;
        let client = Client::builder()
            .https_only(base_url.scheme() == "https")
            .user_agent(concat!("deploygate-upload/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST` target for uploads to `user`
    pub fn upload_url(&self, user: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidValue {
                field: OptionKey::Endpoint.name().to_string(),
                message: format!("'{}' cannot carry a path", self.base_url),
            })?
            .pop_if_empty()
            .extend(["api", "users", user, "apps"]);
        Ok(url)
    }

    /// Build the multipart form, streaming the artifact from an open handle
    async fn build_form(request: &UploadRequest) -> Result<Form> {
        let file = tokio::fs::File::open(&request.artifact_path).await?;
        let length = file.metadata().await?.len();

        let file_name = request
            .artifact_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(request.artifact_kind.binary_name())
            .to_string();

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), length)
            .file_name(file_name)
            .mime_str(request.artifact_kind.mime_type())?;

        let mut form = Form::new()
            .part("file", part)
            .text("token", request.api_token.clone())
            .text("message", request.message.clone());

        if let Some(ref key) = request.distribution_key {
            form = form.text("distribution_key", key.clone());
        }
        if let Some(ref note) = request.release_note {
            form = form.text("release_note", note.clone());
        }

        debug!(bytes = length, "prepared multipart form");
        Ok(form)
    }
}

#[async_trait::async_trait]
impl Transport for DeployGateClient {
    async fn send(&self, request: &UploadRequest) -> Result<Value> {
        let url = self.upload_url(&request.target_user)?;
        let form = Self::build_form(request).await?;

        info!(
            url = %url,
            path = %request.artifact_path.display(),
            binary = request.artifact_kind.binary_name(),
            "uploading to DeployGate"
        );

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "DeployGate responded");

        parse_body(status.as_u16(), &body)
    }
}

/// Decode a response body into a JSON object.
///
/// The HTTP status alone does not decide success; DeployGate reports
/// failures in the body.
fn parse_body(status: u16, body: &str) -> Result<Value> {
    let snippet = || body.chars().take(BODY_SNIPPET_LEN).collect::<String>();

    match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err(UploadError::MalformedResponse {
            status,
            message: format!("expected a JSON object, got: {}", snippet()),
        }),
        Err(e) => Err(UploadError::MalformedResponse {
            status,
            message: format!("{}: {}", e, snippet()),
        }),
    }
}
