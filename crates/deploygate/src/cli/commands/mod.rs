//! CLI commands

mod init;
mod outputs;
mod upload;
mod validate;

pub use init::InitCommand;
pub use outputs::OutputsCommand;
pub use upload::UploadCommand;
pub use validate::ValidateCommand;

use std::path::PathBuf;

use clap::Args;

use deploygate_core::config::{load_config, load_optional_config, process_env, resolve};
use deploygate_core::{DeployGateOptions, PartialOptions};

/// Upload options shared by `upload` and `validate`
///
/// Each option falls back to its DEPLOYGATE_* environment variable, then
/// to the config file, then to its default.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionArgs {
    /// DeployGate API token [env: DEPLOYGATE_API_TOKEN]
    #[arg(long, value_name = "TOKEN")]
    pub api_token: Option<String>,

    /// Target username or organization name [env: DEPLOYGATE_USER]
    #[arg(long)]
    pub user: Option<String>,

    /// Path to the APK file [env: DEPLOYGATE_APK_PATH]
    #[arg(long, value_name = "PATH")]
    pub apk: Option<PathBuf>,

    /// Path to the IPA file [env: DEPLOYGATE_IPA_PATH]
    #[arg(long, value_name = "PATH")]
    pub ipa: Option<PathBuf>,

    /// Release notes [env: DEPLOYGATE_MESSAGE] [default: No changelog provided]
    #[arg(long, short)]
    pub message: Option<String>,

    /// Target distribution key [env: DEPLOYGATE_DISTRIBUTION_KEY]
    #[arg(long)]
    pub distribution_key: Option<String>,

    /// Release note for the distribution page [env: DEPLOYGATE_RELEASE_NOTE]
    #[arg(long)]
    pub release_note: Option<String>,

    /// Service base URL [env: DEPLOYGATE_ENDPOINT] [default: https://deploygate.com]
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Config file (default: nearest deploygate.toml / deploygate.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl OptionArgs {
    fn explicit(&self) -> PartialOptions {
        PartialOptions {
            api_token: self.api_token.clone(),
            user: self.user.clone(),
            apk: self.apk.clone(),
            ipa: self.ipa.clone(),
            message: self.message.clone(),
            distribution_key: self.distribution_key.clone(),
            release_note: self.release_note.clone(),
            endpoint: self.endpoint.clone(),
        }
    }

    /// Resolve flags, environment and config file into one option set
    pub fn resolve(&self) -> anyhow::Result<DeployGateOptions> {
        let file = match &self.config {
            Some(path) => Some(load_config(path)?),
            None => {
                let cwd = std::env::current_dir()?;
                load_optional_config(&cwd)?.map(|(config, _)| config)
            }
        };

        Ok(resolve(&self.explicit(), process_env, file.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_config_file() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("custom.toml");
        std::fs::write(
            &config,
            "user = \"file-user\"\nendpoint = \"http://127.0.0.1:9\"\n",
        )
        .unwrap();

        let args = OptionArgs {
            user: Some("flag-user".to_string()),
            config: Some(config),
            ..Default::default()
        };
        let options = args.resolve().unwrap();

        assert_eq!(options.user, "flag-user");
        assert_eq!(options.endpoint, "http://127.0.0.1:9");
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let args = OptionArgs {
            config: Some(PathBuf::from("/no/such/deploygate.toml")),
            ..Default::default()
        };
        assert!(args.resolve().is_err());
    }
}
