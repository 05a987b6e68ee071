//! Editor configuration
//!
//! Read from a YAML file given on the command line. Every field is optional;
//! missing ones fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::layout::DEFAULT_EDGE_WIDTH;
use crate::pattern::{start_positions_are_valid, DEFAULT_REFERENCE_ROW, MIDI_PITCHES};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Initial window size in points
    pub window_size: [f32; 2],
    pub visible_rows: usize,
    /// Lowest visible pitch row
    pub reference_row: usize,
    pub repeats: usize,
    /// Base column starts after the implicit leading 0
    pub start_positions: Vec<f32>,
    /// Grab width of a note edge in pixels
    pub edge_width: f32,
    /// Column counts of the strips above and below the panel
    pub strip_columns: [usize; 2],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_size: [800.0, 600.0],
            visible_rows: 8,
            reference_row: DEFAULT_REFERENCE_ROW,
            repeats: 1,
            start_positions: Vec::new(),
            edge_width: DEFAULT_EDGE_WIDTH,
            strip_columns: [3, 4],
        }
    }
}

impl EditorConfig {
    /// Load and validate the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.visible_rows < 1 {
            return Err(ConfigError::Invalid("visible_rows must be at least 1".into()));
        }
        if self.reference_row + self.visible_rows > MIDI_PITCHES {
            return Err(ConfigError::Invalid(format!(
                "{} visible rows from row {} do not fit in {MIDI_PITCHES} rows",
                self.visible_rows, self.reference_row
            )));
        }
        if self.repeats < 1 {
            return Err(ConfigError::Invalid("repeats must be at least 1".into()));
        }
        if !start_positions_are_valid(&self.start_positions) {
            return Err(ConfigError::Invalid(format!(
                "start_positions {:?} must ascend strictly inside (0, 1)",
                self.start_positions
            )));
        }
        if !(self.edge_width > 0.0) {
            return Err(ConfigError::Invalid("edge_width must be positive".into()));
        }
        if self.strip_columns.contains(&0) {
            return Err(ConfigError::Invalid("strips need at least one column".into()));
        }
        Ok(())
    }
}
