//! Pre-flight validation of resolved options

use std::net::IpAddr;
use std::path::Path;

use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};

use super::types::{DeployGateOptions, OptionKey};

/// Validate resolved options
///
/// Runs before any network activity. Does not decide which artifact is
/// uploaded; that is the uploader selection's job.
pub fn validate_options(options: &DeployGateOptions) -> Result<()> {
    debug!("validating options");
    validate_required(options)?;
    validate_artifacts(options)?;
    validate_endpoint(&options.endpoint)?;
    debug!("option validation passed");
    Ok(())
}

fn validate_required(options: &DeployGateOptions) -> Result<()> {
    for key in OptionKey::ALL.iter().filter(|k| k.is_required()) {
        let value = match key {
            OptionKey::ApiToken => &options.api_token,
            OptionKey::User => &options.user,
            _ => continue,
        };
        if value.trim().is_empty() {
            return Err(ConfigError::MissingOption(*key));
        }
    }

    if options.user.contains('/') {
        return Err(ConfigError::InvalidValue {
            field: OptionKey::User.name().to_string(),
            message: "user name cannot contain '/'".to_string(),
        });
    }

    Ok(())
}

fn validate_artifacts(options: &DeployGateOptions) -> Result<()> {
    if let Some(apk) = &options.apk {
        validate_artifact_path("apk", apk)?;
    }
    if let Some(ipa) = &options.ipa {
        validate_artifact_path("ipa", ipa)?;
    }
    Ok(())
}

/// Check that an artifact path points at an existing regular file
pub fn validate_artifact_path(kind: &'static str, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(ConfigError::ArtifactNotFound {
            kind,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Check that the service base URL is usable.
///
/// `https` is required; plain `http` is only accepted for loopback hosts.
pub fn validate_endpoint(endpoint: &str) -> Result<Url> {
    let invalid = |message: String| ConfigError::InvalidValue {
        field: OptionKey::Endpoint.name().to_string(),
        message,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(format!("'{}': {}", endpoint, e)))?;

    match url.scheme() {
        "https" => {}
        "http" if is_loopback(&url) => {}
        scheme => {
            return Err(invalid(format!(
                "'{}' uses {}, TLS (https) is required",
                endpoint, scheme
            )))
        }
    }

    if url.host().is_none() {
        return Err(invalid(format!("'{}' has no host", endpoint)));
    }

    Ok(url)
}

fn is_loopback(url: &Url) -> bool {
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}
