//! Init command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use deploygate_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};

use crate::cli::output;
use crate::cli::Cli;

/// Write a starter deploygate.toml
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_TOML));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
        info!(path = %config_path.display(), "wrote config template");

        if !cli.quiet {
            output::success(&format!("Created {}", config_path.display()));
        }

        Ok(())
    }
}
