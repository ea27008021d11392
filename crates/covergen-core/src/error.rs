use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory found")]
    NoConfigDir,

    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("failed to read template {path}: {source}")]
    ReadTemplate {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid DOCX document: {0}")]
    Parse(String),

    #[error("no table cell contains the placeholder {token}")]
    PlaceholderNotFound { token: String },

    #[error("placeholder {token} found in {count} cells, expected exactly one")]
    AmbiguousPlaceholder { token: String, count: usize },

    #[error("cell reference (table {table}, row {row}, cell {cell}) does not resolve")]
    StaleCellRef {
        table: usize,
        row: usize,
        cell: usize,
    },

    #[error("DOCX packing failed: {0}")]
    Pack(String),

    #[error("failed to write {path}: {source}")]
    WriteDocument {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("failed to launch converter {binary}: {source}")]
    Launch {
        binary: String,
        source: std::io::Error,
    },

    #[error("converter exited with {status}: {stderr}")]
    Converter { status: ExitStatus, stderr: String },

    #[error("converter reported success but {path} was not created")]
    MissingOutput { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("document processing failed: {0}")]
    Docx(#[from] DocxError),

    #[error("PDF conversion failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("clipboard copy failed: {0}")]
    Clipboard(#[from] ClipboardError),
}
