//! Content editing error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while editing site content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Unsupported date format: {0}. Use YYYY-MM-DD.")]
    IsoDate(String),

    #[error("Unsupported date format: {0}")]
    NewsDate(String),

    #[error("{kind} with same title already exists: {file}. Use --replace-existing.")]
    Duplicate { kind: &'static str, file: String },

    #[error("Missing file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Source file not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Missing required field '{key}' in {context}")]
    MissingField { key: &'static str, context: String },

    #[error("Invalid manifest: {0}")]
    Manifest(String),
}
