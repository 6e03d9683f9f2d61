use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Send `tracing` output to `path`.
///
/// The terminal belongs to the TUI, so logs only go to a file, and only when
/// one is requested. `RUST_LOG` overrides the default filter.
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grid_snake=info".into()),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}
