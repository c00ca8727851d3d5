use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodexError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Schema validation failed for {source_label}:\n- {}", .violations.join("\n- "))]
    SchemaViolation {
        source_label: String,
        violations: Vec<String>,
    },
}
