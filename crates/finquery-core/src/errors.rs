//! Error types for failure handling across the tool facade
//!
//! Remote-service failures that the calling agent should see are deliberately
//! *not* represented here: per the facade contract they are caught inside each
//! tool and returned as descriptive output strings. `ToolkitError` covers the
//! remaining failure modes, chiefly contract violations by the calling runtime
//! and faults in the supporting plumbing (configuration, I/O, transport).

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ToolkitError {
    #[error("Tool execution failed for '{tool_name}': {message}")]
    ToolError { tool_name: String, message: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Credential error: {0}")]
    CredentialError(String),
    #[error("Retrieval operation failed: {0}")]
    RetrievalError(String),
    #[error("Market data operation failed: {0}")]
    MarketDataError(String),
    #[error("Parsing error: {0}")]
    ParsingError(String),
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for ToolkitError {
    fn from(err: std::io::Error) -> Self {
        ToolkitError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for ToolkitError {
    fn from(err: reqwest::Error) -> Self {
        ToolkitError::MarketDataError(err.to_string())
    }
}
