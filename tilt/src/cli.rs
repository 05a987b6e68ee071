//! Command-line argument parsing for the editor

use clap::Parser;
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::error::ConfigError;

/// Grid step sequencer editor
#[derive(Parser, Debug, Default)]
#[command(name = "tilt", version, about = "Grid step sequencer editor")]
pub struct CliArgs {
    /// YAML config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Number of pitch rows shown at start
    #[arg(long, value_name = "N")]
    pub visible_rows: Option<usize>,

    /// Number of times the base column layout repeats
    #[arg(long, value_name = "N")]
    pub repeats: Option<usize>,
}

impl CliArgs {
    /// Config file (or defaults) with the command-line overrides applied.
    pub fn resolve(&self) -> Result<EditorConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => EditorConfig::load(path)?,
            None => {
                tracing::debug!("No config file given, using defaults");
                EditorConfig::default()
            }
        };
        if let Some(visible_rows) = self.visible_rows {
            config.visible_rows = visible_rows;
        }
        if let Some(repeats) = self.repeats {
            config.repeats = repeats;
        }
        config.validate()?;
        Ok(config)
    }
}
