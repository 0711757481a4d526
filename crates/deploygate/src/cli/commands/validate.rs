//! Validate command - check options without uploading

use clap::Args;
use console::style;
use serde_json::json;
use tracing::info;

use deploygate_core::config::validate_options;
use deploygate_upload::Uploader;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

use super::OptionArgs;

/// Resolve and check options without uploading
#[derive(Debug, Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub options: OptionArgs,
}

impl ValidateCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing validate command");
        let options = self.options.resolve()?;

        validate_options(&options)?;
        let uploader = Uploader::select(&options)?;
        uploader.request(&options)?;

        let shown = options.redacted();

        if cli.format == OutputFormat::Json {
            let report = json!({
                "valid": true,
                "binary": uploader.binary_name(),
                "platform": uploader.kind().platform(),
                "options": shown,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        if cli.quiet {
            return Ok(());
        }

        output::success(&format!(
            "Ready to upload {} {}",
            uploader.binary_name(),
            style(uploader.artifact_path().display()).cyan()
        ));
        println!("{}", output::key_value("User", &shown.user));
        println!("{}", output::key_value("API token", &shown.api_token));
        println!("{}", output::key_value("Message", &shown.message));
        if let Some(ref key) = shown.distribution_key {
            println!("{}", output::key_value("Distribution key", key));
        }
        if let Some(ref note) = shown.release_note {
            println!("{}", output::key_value("Release note", note));
        }
        println!("{}", output::key_value("Endpoint", &shown.endpoint));

        Ok(())
    }
}
