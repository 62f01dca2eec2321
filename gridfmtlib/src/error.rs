//! Error types for gridfmtlib

use std::path::PathBuf;
use thiserror::Error;

/// A value could not be rendered under a format spec.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The value is not of the type the formatter requires
    #[error("cannot format {value} as {expected}")]
    NotNumeric { value: String, expected: &'static str },

    /// NaN or infinity
    #[error("cannot format non-finite number {0}")]
    NonFinite(f64),

    /// Integer-only formats reject fractional values
    #[error("{0} is not an integer")]
    NotInteger(f64),

    /// Format-spec string could not be parsed
    #[error("invalid format spec '{spec}': {message}")]
    InvalidSpec { spec: String, message: String },

    /// Formatting failed for a specific grid cell
    #[error("column '{field}', row {row}: {source}")]
    Cell {
        field: String,
        row: usize,
        #[source]
        source: Box<FormatError>,
    },
}

/// The column/dataset pairing is invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required column references a field no record contains
    #[error("unknown field '{field}': not present in any dataset record")]
    UnknownField { field: String },

    /// Two columns target the same field with different formatters
    #[error("duplicate field '{field}' with conflicting formatters")]
    DuplicateField { field: String },

    /// Column field name is empty
    #[error("column {index} has an empty field name")]
    EmptyField { index: usize },

    /// Column header label is empty
    #[error("column '{field}' has an empty header label")]
    EmptyHeader { field: String },

    /// More than one sizing strategy is active in the grid
    #[error("column '{field}' sizing '{hint}' conflicts with grid sizing '{active}'")]
    ConflictingSizing {
        field: String,
        hint: String,
        active: String,
    },
}

/// Errors that can occur while loading data or building grids
#[derive(Error, Debug)]
pub enum GridfmtError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Unrecognized dataset file extension
    #[error("unsupported dataset format: {0} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),

    /// JSON dataset or column file could not be parsed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV dataset could not be parsed
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Grid configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Value formatting error
    #[error(transparent)]
    Format(#[from] FormatError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
