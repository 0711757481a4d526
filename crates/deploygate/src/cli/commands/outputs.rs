//! Outputs command - describe published values and accepted options

use clap::Args;
use console::style;
use serde_json::json;

use deploygate_core::{OptionKey, OutputKey};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// List the values published after a successful upload
#[derive(Debug, Args)]
pub struct OutputsCommand {
    /// Also list accepted options and their environment variables
    #[arg(long)]
    pub options: bool,
}

impl OutputsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        if cli.format == OutputFormat::Json {
            let outputs: Vec<_> = OutputKey::ALL
                .iter()
                .map(|k| json!({"key": k.as_str(), "description": k.description()}))
                .collect();
            let mut report = json!({ "outputs": outputs });
            if self.options {
                report["options"] = OptionKey::ALL
                    .iter()
                    .map(|k| {
                        json!({
                            "key": k.name(),
                            "env": k.env_var(),
                            "required": k.is_required(),
                            "description": k.description(),
                        })
                    })
                    .collect();
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("{}", output::header("Outputs"));
        for key in OutputKey::ALL {
            println!("{}", output::key_value(key.as_str(), key.description()));
        }

        if self.options {
            println!();
            println!("{}", output::header("Options"));
            for key in OptionKey::ALL {
                let required = if key.is_required() {
                    style(" (required)").yellow().to_string()
                } else {
                    String::new()
                };
                println!(
                    "{}{}",
                    output::key_value(
                        &format!("--{}", key.flag()),
                        &format!("{} [env: {}]", key.description(), key.env_var())
                    ),
                    required
                );
            }
        }

        Ok(())
    }
}
