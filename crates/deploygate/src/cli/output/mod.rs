//! Output formatting utilities

use console::style;
use deploygate_upload::Reporter;
use tracing::debug;

use crate::cli::Cli;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", style("→").blue(), message);
}

/// Create a styled header
pub fn header(text: &str) -> String {
    style(text).bold().to_string()
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Reporter printing upload progress to the terminal
///
/// Errors always go to stderr; progress lines respect `--quiet` and
/// `--format json`.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    show_progress: bool,
}

impl ConsoleReporter {
    pub fn new(cli: &Cli) -> Self {
        Self {
            show_progress: cli.shows_progress(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn success(&self, message: &str) {
        debug!(outcome = "success", "{}", message);
        if self.show_progress {
            success(message);
        }
    }

    fn message(&self, message: &str) {
        debug!("{}", message);
        if self.show_progress {
            info(message);
        }
    }

    fn error(&self, message: &str) {
        debug!(outcome = "error", "{}", message);
        error(message);
    }
}
