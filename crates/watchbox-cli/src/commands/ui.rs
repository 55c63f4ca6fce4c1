use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

/// Spinner shown while a catalog request is in flight.
///
/// Falls back to a structured log line when not attached to a terminal.
pub struct LoadingIndicator {
    spinner: Option<ProgressBar>,
}

impl LoadingIndicator {
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        if !is_interactive() {
            tracing::debug!(operation = "progress", message = %message, "Request in flight");
            return Self { spinner: None };
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner: Some(spinner) }
    }

    pub fn finish(self) {
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
    }
}

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}
