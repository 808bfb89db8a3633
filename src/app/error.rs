use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("`{tool}` failed: {message}")]
    Tool { tool: String, message: String },

    #[error("Theme error: {0}")]
    Theme(String),

    #[error("Grammar error: {0}")]
    Grammar(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl AppError {
    /// Shorthand for a tool failure with a named tool.
    pub fn tool(tool: &str, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
