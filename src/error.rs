use std::path::PathBuf;
use thiserror::Error;

pub type InspectResult<T> = Result<T, InspectError>;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Sheet '{name}' not found. Available sheets: {}", .available.join(", "))]
    SheetNotFound { name: String, available: Vec<String> },

    #[error("Invalid column identifier: '{0}'")]
    InvalidColumn(String),

    #[error("Workbook contains no worksheets")]
    EmptyWorkbook,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}
