use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Build the level filter from CLI flags.
///
/// quiet = error only; 0 = `default_level`; 1 = debug (hyper noise suppressed); 2+ = trace.
/// `RUST_LOG` overrides everything except quiet.
fn build_filter(verbose_level: u8, quiet: bool, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    let filter_str = match verbose_level {
        0 => default_level,
        1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn,reqwest::connect=info",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str))
}

fn rolling_appender(log_path: &Path) -> Result<RollingFileAppender> {
    let log_dir = log_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Log file path has no parent directory"))?;
    std::fs::create_dir_all(log_dir)?;

    let log_filename = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

    // Files are named watchbox.2026-01-17 etc.; the extension is dropped from the prefix
    let log_prefix = log_filename.rsplitn(2, '.').nth(1).unwrap_or(log_filename);

    Ok(RollingFileAppender::new(Rotation::DAILY, log_dir, log_prefix))
}

pub fn init_logging(verbose_level: u8, quiet: bool, default_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let filter = build_filter(verbose_level, quiet, default_level);

    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    match (log_file, json) {
        (Some(path), true) => {
            let layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(rolling_appender(&path)?);
            registry.with(layer).try_init()?;
        }
        (Some(path), false) => {
            let layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false)
                .with_writer(rolling_appender(&path)?);
            registry.with(layer).try_init()?;
        }
        (None, true) => {
            let layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(io::stderr);
            registry.with(layer).try_init()?;
        }
        (None, false) => {
            let layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(io::stderr);
            registry.with(layer).try_init()?;
        }
    }

    Ok(())
}
