//! Upload command - send a build to DeployGate

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use serde_json::json;
use tracing::info;

use deploygate_core::{DeployGateOptions, LaneContext};
use deploygate_upload::{DeployGateAction, DeployGateClient};

use crate::cli::output::{self, ConsoleReporter};
use crate::cli::{Cli, OutputFormat};

use super::OptionArgs;

/// Upload an APK or IPA to DeployGate
#[derive(Debug, Args)]
pub struct UploadCommand {
    #[command(flatten)]
    pub options: OptionArgs,

    /// Append published outputs (KEY=value lines) to this file, e.g. $GITHUB_OUTPUT
    #[arg(long, value_name = "PATH", env = "DEPLOYGATE_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

impl UploadCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(output_file = ?self.output_file, "executing upload command");
        let options = self.options.resolve()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.upload(&options, cli))
    }

    async fn upload(&self, options: &DeployGateOptions, cli: &Cli) -> anyhow::Result<()> {
        let client = DeployGateClient::new(&options.endpoint)?;
        let action = DeployGateAction::new(client, ConsoleReporter::new(cli));
        let mut context = LaneContext::new();

        let result = action.run(options, &mut context).await?;

        if let Some(ref path) = self.output_file {
            context
                .write_env_file(path)
                .with_context(|| format!("Failed to write outputs to {}", path.display()))?;
        }

        if cli.format == OutputFormat::Json {
            let report = json!({
                "result": result,
                "outputs": context.to_json(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if !cli.quiet {
            println!();
            println!("{}", output::header("Upload completed"));
            println!(
                "{}",
                output::key_value("URL", &style(&result.distribution_url).cyan().to_string())
            );
            println!("{}", output::key_value("Revision", &result.revision.to_string()));
            if let Some(ref path) = self.output_file {
                println!(
                    "{}",
                    output::key_value("Outputs", &style(path.display()).dim().to_string())
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;
    use serde_json::Value;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer a single request on a loopback port with `body`
    async fn serve_once(body: &'static str) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 8192];

            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);

                let text = String::from_utf8_lossy(&buf).to_string();
                let Some(header_end) = text.find("\r\n\r\n") else {
                    continue;
                };
                let content_length = text[..header_end]
                    .to_ascii_lowercase()
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:").map(str::to_string))
                    .and_then(|v| v.trim().parse::<usize>().ok());

                match content_length {
                    Some(expected) if buf.len() - (header_end + 4) >= expected => break,
                    None if text.ends_with("0\r\n\r\n") => break,
                    _ => continue,
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_upload_appends_outputs_to_file() {
        let temp = TempDir::new().unwrap();
        let apk = temp.path().join("app.apk");
        std::fs::write(&apk, b"APK-BYTES").unwrap();
        let output_file = temp.path().join("github_output");
        std::fs::write(&output_file, "EARLIER=step\n").unwrap();

        let (endpoint, server) =
            serve_once(r#"{"error":false,"results":{"path":"/p/1","revision":7}}"#).await;

        let cli = Cli::try_parse_from([
            "deploygate",
            "--quiet",
            "upload",
            "--output-file",
            output_file.to_str().unwrap(),
        ])
        .unwrap();
        let Commands::Upload(ref cmd) = cli.command else {
            panic!("expected upload command");
        };

        let options = DeployGateOptions {
            api_token: "secret".to_string(),
            user: "alice".to_string(),
            apk: Some(apk),
            ipa: None,
            message: "No changelog provided".to_string(),
            distribution_key: None,
            release_note: None,
            endpoint: endpoint.clone(),
        };

        cmd.upload(&options, &cli).await.unwrap();
        server.await.unwrap();

        let written = std::fs::read_to_string(&output_file).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "EARLIER=step");
        assert_eq!(lines[1], format!("DISTRIBUTION_URL={}/p/1", endpoint));
        assert_eq!(lines[2], "REVISION=7");

        let app_info = lines[3].strip_prefix("APP_INFO=").unwrap();
        let app_info: Value = serde_json::from_str(app_info).unwrap();
        assert_eq!(app_info["revision"], Value::from(7));
        assert_eq!(app_info["path"], Value::from("/p/1"));
    }
}
