//! Response interpretation
//!
//! DeployGate answers every upload with a JSON object. `error: true` marks a
//! service-level failure with a `message`; `error: false` carries the new
//! build under `results`.

use chrono::Utc;
use deploygate_core::{OutputKey, ResultPublisher};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Result, UploadError};
use crate::reporter::Reporter;
use crate::types::{ErrorCategory, UploadResult};

/// Known service messages, their category and the hint shown to the user
const KNOWN_ERRORS: &[(&str, ErrorCategory, &str)] = &[
    (
        "you are not authenticated",
        ErrorCategory::NotAuthenticated,
        "Invalid API Token specified.",
    ),
    (
        "application create error: permit",
        ErrorCategory::PermitDenied,
        "Access denied: wrong user or not a joined tester?",
    ),
    (
        "application create error: limit",
        ErrorCategory::PlanLimit,
        "Plan limit reached or plan expired.",
    ),
];

/// Map a service message to its category and optional hint
pub fn categorize(message: &str) -> (ErrorCategory, Option<&'static str>) {
    KNOWN_ERRORS
        .iter()
        .find(|(known, _, _)| *known == message)
        .map(|(_, category, hint)| (*category, Some(*hint)))
        .unwrap_or((ErrorCategory::Unknown, None))
}

/// Classifies a decoded response and publishes the outcome
#[derive(Debug, Clone)]
pub struct ResponseInterpreter {
    base_url: String,
    binary_name: &'static str,
}

impl ResponseInterpreter {
    /// `base_url` prefixes `results.path` to form the distribution URL
    pub fn new(base_url: &str, binary_name: &'static str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            binary_name,
        }
    }

    /// Interpret `payload`.
    ///
    /// On success the URL, revision and `results` document are published and
    /// returned; announcing them is left to the caller. On failure the
    /// service message and hint go to `reporter` and nothing is published.
    pub fn interpret(
        &self,
        payload: &Value,
        publisher: &mut dyn ResultPublisher,
        reporter: &dyn Reporter,
    ) -> Result<UploadResult> {
        let Some(error) = payload.get("error") else {
            return Err(self.unexpected(payload, reporter));
        };

        if is_truthy(error) {
            return Err(self.service_error(payload, reporter));
        }

        let results = payload.get("results");
        let path = results.and_then(|r| r.get("path")).and_then(Value::as_str);
        let revision = results
            .and_then(|r| r.get("revision"))
            .and_then(Value::as_i64);

        let (Some(results), Some(path), Some(revision)) = (results, path, revision) else {
            warn!("success response without results.path or results.revision");
            return Err(self.unexpected(payload, reporter));
        };

        let distribution_url = format!("{}{}", self.base_url, path);

        publisher.publish(
            OutputKey::DistributionUrl,
            Value::String(distribution_url.clone()),
        );
        publisher.publish(OutputKey::Revision, Value::from(revision));
        publisher.publish(OutputKey::AppInfo, results.clone());

        info!(
            binary = self.binary_name,
            url = %distribution_url,
            revision,
            "upload accepted"
        );

        Ok(UploadResult {
            distribution_url,
            revision,
            app_info: results.clone(),
            uploaded_at: Utc::now(),
        })
    }

    fn service_error(&self, payload: &Value, reporter: &dyn Reporter) -> UploadError {
        let message = match payload.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let (category, hint) = categorize(&message);

        reporter.error(&format!("Error uploading to DeployGate: {}", message));
        if let Some(hint) = hint {
            reporter.error(hint);
        }
        debug!(category = %category, "service rejected upload");

        UploadError::Service { message, category }
    }

    fn unexpected(&self, payload: &Value, reporter: &dyn Reporter) -> UploadError {
        let payload = payload.to_string();
        reporter.error(&format!("Error uploading to DeployGate: {}", payload));
        UploadError::UnexpectedResponse { payload }
    }
}

/// `null` and `false` are falsy, anything else is truthy
fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}
