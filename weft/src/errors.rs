//! Error types for weft.

use std::path::PathBuf;
use thiserror::Error;

use crate::text_location::TextLocation;

/// Main error type for weft operations.
#[derive(Error, Debug)]
pub enum WeftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error at {location}: {message}")]
    Parse { location: TextLocation, message: String },

    #[error("Unknown highlight style: {0}")]
    UnknownStyle(String),

    #[error("{program} exited with status {}", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    ToolFailed { program: String, code: Option<i32> },

    #[error("Server error: {0}")]
    Server(String),

    #[error("Watch error: {0}")]
    Watch(String),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl WeftError {
    /// Wraps an I/O error with the path it concerns.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Exit code a process should report for this error.
    ///
    /// A failing external tool propagates its own status; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Result type alias for weft operations.
pub type Result<T> = std::result::Result<T, WeftError>;

/// Reads a file to a string, attaching the path to any error.
pub fn read_to_string(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| WeftError::file(path, e))
}
