//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Declared upload options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// DeployGate API token
    ApiToken,
    /// Target username or organization name
    User,
    /// Path to the APK file
    Apk,
    /// Path to the IPA file
    Ipa,
    /// Release notes
    Message,
    /// Target distribution key
    DistributionKey,
    /// Release note for the distribution page
    ReleaseNote,
    /// Base URL of the distribution service
    Endpoint,
}

impl OptionKey {
    /// Every declared option, in display order
    pub const ALL: [OptionKey; 8] = [
        Self::ApiToken,
        Self::User,
        Self::Apk,
        Self::Ipa,
        Self::Message,
        Self::DistributionKey,
        Self::ReleaseNote,
        Self::Endpoint,
    ];

    /// Key used in config files
    pub fn name(&self) -> &'static str {
        match self {
            Self::ApiToken => "api_token",
            Self::User => "user",
            Self::Apk => "apk",
            Self::Ipa => "ipa",
            Self::Message => "message",
            Self::DistributionKey => "distribution_key",
            Self::ReleaseNote => "release_note",
            Self::Endpoint => "endpoint",
        }
    }

    /// Command-line flag (without leading dashes)
    pub fn flag(&self) -> &'static str {
        match self {
            Self::ApiToken => "api-token",
            Self::User => "user",
            Self::Apk => "apk",
            Self::Ipa => "ipa",
            Self::Message => "message",
            Self::DistributionKey => "distribution-key",
            Self::ReleaseNote => "release-note",
            Self::Endpoint => "endpoint",
        }
    }

    /// Environment variable consulted when no explicit value is given
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::ApiToken => "DEPLOYGATE_API_TOKEN",
            Self::User => "DEPLOYGATE_USER",
            Self::Apk => "DEPLOYGATE_APK_PATH",
            Self::Ipa => "DEPLOYGATE_IPA_PATH",
            Self::Message => "DEPLOYGATE_MESSAGE",
            Self::DistributionKey => "DEPLOYGATE_DISTRIBUTION_KEY",
            Self::ReleaseNote => "DEPLOYGATE_RELEASE_NOTE",
            Self::Endpoint => "DEPLOYGATE_ENDPOINT",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::ApiToken => "API Token",
            Self::User => "User",
            Self::Apk => "APK path",
            Self::Ipa => "IPA path",
            Self::Message => "Release Notes",
            Self::DistributionKey => "Target Distribution Key",
            Self::ReleaseNote => "Release note for distribution page",
            Self::Endpoint => "Service base URL",
        }
    }

    /// Whether a value must be present after resolution
    pub fn is_required(&self) -> bool {
        matches!(self, Self::ApiToken | Self::User)
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A partially specified option set
///
/// Used both for explicitly passed values and for the on-disk config file
/// (`deploygate.toml` / `deploygate.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialOptions {
    pub api_token: Option<String>,
    pub user: Option<String>,
    pub apk: Option<PathBuf>,
    pub ipa: Option<PathBuf>,
    pub message: Option<String>,
    pub distribution_key: Option<String>,
    pub release_note: Option<String>,
    pub endpoint: Option<String>,
}

impl PartialOptions {
    /// Make relative artifact paths relative to `base` instead of the
    /// current directory.
    pub fn rebase_paths(&mut self, base: &Path) {
        for path in [&mut self.apk, &mut self.ipa].into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Fully resolved upload options
#[derive(Clone, PartialEq, Serialize)]
pub struct DeployGateOptions {
    /// DeployGate API token
    pub api_token: String,

    /// Target username or organization name
    pub user: String,

    /// Path to the APK file
    pub apk: Option<PathBuf>,

    /// Path to the IPA file
    pub ipa: Option<PathBuf>,

    /// Release notes
    pub message: String,

    /// Target distribution key
    pub distribution_key: Option<String>,

    /// Release note for the distribution page
    pub release_note: Option<String>,

    /// Base URL of the distribution service
    pub endpoint: String,
}

impl DeployGateOptions {
    /// Copy with the API token masked, safe to print or log
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.api_token.is_empty() {
            copy.api_token = "********".to_string();
        }
        copy
    }
}

impl std::fmt::Debug for DeployGateOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployGateOptions")
            .field("api_token", &"********")
            .field("user", &self.user)
            .field("apk", &self.apk)
            .field("ipa", &self.ipa)
            .field("message", &self.message)
            .field("distribution_key", &self.distribution_key)
            .field("release_note", &self.release_note)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
