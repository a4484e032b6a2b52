//! Shared CLI error and exit code types.

use thiserror::Error;

use crate::services::ConversionError;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input or arguments were rejected
    ValidationError = 1,
    /// Reading or writing a file failed
    IoError = 2,
}

/// Error returned by CLI command handlers.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CliError {
    /// Exit code the process should terminate with
    pub code: ExitCode,
    /// Human-readable message printed to stderr
    pub message: String,
}

impl CliError {
    /// Creates an error for rejected input or arguments.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Creates an error for failed file operations.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Numeric process exit code.
    pub fn exit_code(&self) -> i32 {
        self.code as i32
    }
}

impl From<ConversionError> for CliError {
    fn from(err: ConversionError) -> Self {
        if err.is_input_error() {
            Self::validation(err.to_string())
        } else {
            Self::io(format!("{err:#}"))
        }
    }
}

/// Result type for CLI command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Pretty-prints a JSON response to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
