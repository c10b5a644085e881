use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::app::OverlayOutcome;

use super::DocumentFormat;

/// Destination for serialized output values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    /// `-` means stdout, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        if raw == "-" {
            OutputDestination::Stdout
        } else {
            OutputDestination::file(raw)
        }
    }
}

/// Controls how the session outcome is serialized.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self::new(DocumentFormat::Json)
    }
}

/// Serialize the session outcome and write it to every configured destination.
pub fn emit(outcome: &OverlayOutcome, options: &OutputOptions) -> Result<()> {
    if options.destinations.is_empty() {
        return Ok(());
    }
    let payload = render_outcome(outcome, options)?;
    for destination in &options.destinations {
        match destination {
            OutputDestination::Stdout => writeln!(io::stdout().lock(), "{payload}")
                .context("failed to write outcome to stdout")?,
            OutputDestination::File(path) => fs::write(path, format!("{payload}\n"))
                .with_context(|| format!("failed to write outcome to {}", path.display()))?,
        }
        debug!(?destination, widget = %outcome.id, "outcome written");
    }
    Ok(())
}

/// Render `outcome` in the configured format.
pub fn render_outcome(outcome: &OverlayOutcome, options: &OutputOptions) -> Result<String> {
    match options.format {
        DocumentFormat::Json if options.pretty => {
            serde_json::to_string_pretty(outcome).context("failed to serialize outcome as JSON")
        }
        DocumentFormat::Json => {
            serde_json::to_string(outcome).context("failed to serialize outcome as JSON")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::to_string(outcome).context("failed to serialize outcome as YAML")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml if options.pretty => {
            toml::to_string_pretty(outcome).context("failed to serialize outcome as TOML")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => {
            toml::to_string(outcome).context("failed to serialize outcome as TOML")
        }
    }
}
