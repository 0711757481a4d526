//! Default configuration values

/// Base URL of the distribution service
pub const DEFAULT_ENDPOINT: &str = "https://deploygate.com";

/// Message sent when no changelog is configured
pub const DEFAULT_MESSAGE: &str = "No changelog provided";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "deploygate.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "deploygate.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".deploygate.toml",
        ".deploygate.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# DeployGate upload configuration
# Every key can also be given as a flag or a DEPLOYGATE_* environment variable.
# Keep api_token out of version control; prefer DEPLOYGATE_API_TOKEN.

user = "your-user-or-organization"
apk = "app/build/outputs/apk/release/app-release.apk"
message = "No changelog provided"
# distribution_key = ""
# release_note = ""
"#;
