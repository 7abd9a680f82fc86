use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    FileNotFound,
    CloneFailed,
    AnalyzerFailed,
    IoError,
    InvalidRequest,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound => write!(f, "FILE_NOT_FOUND"),
            Self::CloneFailed => write!(f, "CLONE_FAILED"),
            Self::AnalyzerFailed => write!(f, "ANALYZER_FAILED"),
            Self::IoError => write!(f, "IO_ERROR"),
            Self::InvalidRequest => write!(f, "INVALID_REQUEST"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HarvestError {
    pub code: ErrorCode,
    pub message: String,
}

impl fmt::Display for HarvestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for HarvestError {}

impl HarvestError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn file_not_found(path: &str) -> Self {
        Self::new(ErrorCode::FileNotFound, format!("File not found: {path}"))
    }

    pub fn clone_failed(url: &str, detail: &str) -> Self {
        Self::new(
            ErrorCode::CloneFailed,
            format!("Failed to clone {url}: {detail}"),
        )
    }

    pub fn analyzer_failed(detail: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::AnalyzerFailed,
            format!("Failed to run analyzer: {detail}"),
        )
    }
}
