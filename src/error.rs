//! Error types for IFC Finder.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing IFC files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the IFC file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The STEP format is invalid or malformed.
    #[error("invalid STEP format: {message}")]
    InvalidStep { message: String },
}

/// Errors that can occur when building or evaluating queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A rule pattern failed to compile. Raised when the rule is
    /// constructed, never during evaluation.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// The model handle does not refer to a loaded model.
    #[error("unknown model id {0}")]
    UnknownModel(u32),
}

/// Errors that can occur when fetching model sources.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Failed to read a local file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The HTTP request failed or returned a non-success status.
    #[error("failed to fetch '{url}': {source}")]
    Http { url: String, source: reqwest::Error },
}

/// Errors that can occur when exporting match reports.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file.
    #[error("failed to create file '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },
}
