//! Option resolution across explicit values, environment and config file

use std::path::PathBuf;

use tracing::debug;

use super::defaults::{DEFAULT_ENDPOINT, DEFAULT_MESSAGE};
use super::types::{DeployGateOptions, OptionKey, PartialOptions};

/// Environment lookup backed by the process environment
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Resolve every option.
///
/// Per key the first non-empty value wins: `explicit`, then the environment
/// variable returned by `env`, then `file`, then the default. Required keys
/// without a value resolve to an empty string; [`validate_options`] rejects
/// them.
///
/// [`validate_options`]: super::validate_options
pub fn resolve<F>(explicit: &PartialOptions, env: F, file: Option<&PartialOptions>) -> DeployGateOptions
where
    F: Fn(&str) -> Option<String>,
{
    let no_file = PartialOptions::default();
    let file = file.unwrap_or(&no_file);

    let from_env = |key: OptionKey| non_empty(env(key.env_var()));

    let text = |key: OptionKey, explicit: &Option<String>, file: &Option<String>| {
        let value = non_empty(explicit.clone())
            .map(|v| (v, "explicit"))
            .or_else(|| from_env(key).map(|v| (v, "env")))
            .or_else(|| non_empty(file.clone()).map(|v| (v, "file")));
        if let Some((_, source)) = &value {
            debug!(option = %key, source, "resolved option");
        }
        value.map(|(v, _)| v)
    };

    let path = |key: OptionKey, explicit: &Option<PathBuf>, file: &Option<PathBuf>| {
        let as_text = |p: &Option<PathBuf>| p.as_ref().map(|p| p.to_string_lossy().into_owned());
        let explicit_set = non_empty(as_text(explicit)).is_some();
        if explicit_set {
            debug!(option = %key, source = "explicit", "resolved option");
            return explicit.clone();
        }
        if let Some(value) = from_env(key) {
            debug!(option = %key, source = "env", "resolved option");
            return Some(PathBuf::from(value));
        }
        non_empty(as_text(file)).and(file.clone())
    };

    DeployGateOptions {
        api_token: text(OptionKey::ApiToken, &explicit.api_token, &file.api_token)
            .unwrap_or_default(),
        user: text(OptionKey::User, &explicit.user, &file.user).unwrap_or_default(),
        apk: path(OptionKey::Apk, &explicit.apk, &file.apk),
        ipa: path(OptionKey::Ipa, &explicit.ipa, &file.ipa),
        message: text(OptionKey::Message, &explicit.message, &file.message)
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        distribution_key: text(
            OptionKey::DistributionKey,
            &explicit.distribution_key,
            &file.distribution_key,
        ),
        release_note: text(
            OptionKey::ReleaseNote,
            &explicit.release_note,
            &file.release_note,
        ),
        endpoint: text(OptionKey::Endpoint, &explicit.endpoint, &file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = resolve(&PartialOptions::default(), env_from(&[]), None);

        assert_eq!(options.message, "No changelog provided");
        assert_eq!(options.endpoint, "https://deploygate.com");
        assert!(options.api_token.is_empty());
        assert!(options.apk.is_none());
        assert!(options.distribution_key.is_none());
    }

    #[test]
    fn test_env_fallback() {
        let env = env_from(&[
            ("DEPLOYGATE_API_TOKEN", "env-token"),
            ("DEPLOYGATE_USER", "env-user"),
            ("DEPLOYGATE_APK_PATH", "/tmp/app.apk"),
            ("DEPLOYGATE_RELEASE_NOTE", "notes"),
        ]);
        let options = resolve(&PartialOptions::default(), env, None);

        assert_eq!(options.api_token, "env-token");
        assert_eq!(options.user, "env-user");
        assert_eq!(options.apk, Some(PathBuf::from("/tmp/app.apk")));
        assert_eq!(options.release_note.as_deref(), Some("notes"));
    }

    #[test]
    fn test_precedence() {
        let explicit = PartialOptions {
            user: Some("flag-user".to_string()),
            ..Default::default()
        };
        let file = PartialOptions {
            user: Some("file-user".to_string()),
            api_token: Some("file-token".to_string()),
            message: Some("file message".to_string()),
            ..Default::default()
        };
        let env = env_from(&[
            ("DEPLOYGATE_USER", "env-user"),
            ("DEPLOYGATE_API_TOKEN", "env-token"),
        ]);

        let options = resolve(&explicit, env, Some(&file));

        assert_eq!(options.user, "flag-user");
        assert_eq!(options.api_token, "env-token");
        assert_eq!(options.message, "file message");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let explicit = PartialOptions {
            user: Some("   ".to_string()),
            apk: Some(PathBuf::new()),
            ..Default::default()
        };
        let env = env_from(&[
            ("DEPLOYGATE_USER", "env-user"),
            ("DEPLOYGATE_MESSAGE", ""),
        ]);
        let file = PartialOptions {
            apk: Some(PathBuf::from("/p/app.apk")),
            ..Default::default()
        };

        let options = resolve(&explicit, env, Some(&file));

        assert_eq!(options.user, "env-user");
        assert_eq!(options.message, "No changelog provided");
        assert_eq!(options.apk, Some(PathBuf::from("/p/app.apk")));
    }
}
