use std::{fs::OpenOptions, path::Path, sync::Mutex};

use color_eyre::eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// without a log file nothing is installed and events are dropped.
pub fn init(log_file: Option<&Path>, verbose: bool) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("could not create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("could not open log file {}", path.display()))?;

    let default_level = if verbose {
        "homeboard=debug,homeboard_cli=debug"
    } else {
        "homeboard=info,homeboard_cli=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
