//! deploygate - upload Android and iOS builds to DeployGate

mod cli;
mod exit_codes;

use std::path::PathBuf;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use cli::{output, Cli};

fn main() {
    let cli = Cli::parse();
    let guard = init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        output::error(&exit_codes::describe(&err));
        let code = exit_codes::for_error(&err);
        drop(guard);
        std::process::exit(code);
    }
}

/// Install the tracing subscriber.
///
/// Console events go to stderr, filtered by `RUST_LOG` (default `warn`, or
/// `debug` with `--verbose`). Every debug event is also written as JSON to a
/// daily file under `~/.deploygate/logs/` when that directory is usable.
fn init_tracing(verbose: bool) -> Option<WorkerGuard> {
    let level = if verbose { "debug" } else { "warn" };
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)));

    let (file, guard) = match log_directory() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "deploygate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    guard
}

fn log_directory() -> Option<PathBuf> {
    let dir = dirs::home_dir()?.join(".deploygate").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
