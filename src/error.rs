//! Error types for pattern loading.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the pattern loader.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Pattern directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Cannot read PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("Page {page} has no usable MediaBox")]
    MissingMediaBox { page: usize },

    #[error("Page {page}: {message}")]
    Page { page: usize, message: String },

    #[error("Piece size '{piece}' does not match garment size '{garment}'")]
    SizeMismatch { piece: String, garment: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pattern operations.
pub type Result<T> = std::result::Result<T, PatternError>;
