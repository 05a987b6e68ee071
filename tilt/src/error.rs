use std::path::PathBuf;

use thiserror::Error;

/// Lookups into the pattern that can fail without a caller bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("column {column} is outside the row (0..{columns})")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// Walking the connection chain visited every column without meeting a
    /// span boundary, i.e. the row is connected all the way round.
    #[error("row {row}: span containing column {column} has no boundary")]
    UnterminatedSpan { row: usize, column: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}
