use miette::Diagnostic;
use thiserror::Error;

/// Main error type for loupe operations
#[derive(Error, Diagnostic, Debug)]
pub enum LoupeError {
    #[error("IO error: {0}")]
    #[diagnostic(code(loupe::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(loupe::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Snapshot error: {message}")]
    #[diagnostic(code(loupe::snapshot))]
    Snapshot {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("No element matches target '{target}'")]
    #[diagnostic(
        code(loupe::target),
        help("Use an element id, or a tag name to match the first element with that tag")
    )]
    TargetNotFound { target: String },

    #[error("JSON error: {0}")]
    #[diagnostic(code(loupe::json))]
    Json(#[from] serde_json::Error),

    #[error("Style error: {message}")]
    #[diagnostic(code(loupe::style))]
    Style {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, LoupeError>;
