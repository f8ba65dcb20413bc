use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Library error type
// ---------------------------------------------------------------------------

/// Everything that can go wrong between reading `curvature.txt` and showing
/// the figure.  All variants are fatal for the command-line tool.
#[derive(Debug, Error)]
pub enum CurvatureError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Non-numeric or malformed table content.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Data that parses but cannot be reduced (bad permutation, zero length, ...).
    #[error("invalid data: {0}")]
    Validation(String),

    #[error("style sheet line {line}: {message}")]
    Style { line: usize, message: String },

    #[error("rendering failed: {0}")]
    Render(String),

    #[error("viewer failed: {0}")]
    Viewer(String),

    #[error("serializing report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CurvatureError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CurvatureError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CurvatureError>;
