//! Error types for EDA tool operations.
//!
//! All fallible operations return [`EdaResult<T>`]. Unknown file types are not
//! errors; backends report them as [`crate::Diagnostic`]s instead.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for EDA tool operations.
pub type EdaResult<T> = std::result::Result<T, EdaError>;

/// Error type shared by the project model and all backends.
#[derive(Error, Debug)]
pub enum EdaError {
    /// Reading or writing a file in the work root failed
    #[error("IO error on {path}: {source}")]
    Io {
        /// File or directory that was being accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The project description could not be loaded
    #[error("Invalid EDAM description: {message}")]
    Edam {
        /// Detailed error message
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A parameter value does not match its declared datatype
    #[error("Invalid value for parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// What was wrong with the value
        message: String,
    },

    /// A runtime argument names a parameter the project does not declare
    #[error("Unknown parameter '{name}'")]
    UnknownParameter {
        /// Name given on the command line
        name: String,
    },

    /// The tool options for a backend could not be interpreted
    #[error("Invalid options for tool '{tool}': {message}")]
    InvalidToolOptions {
        /// Backend name
        tool: String,
        /// Error details
        message: String,
    },

    /// Two VPI modules share a name (names are Makefile targets)
    #[error("Duplicate VPI module name '{name}'")]
    DuplicateVpiModule {
        /// The repeated module name
        name: String,
    },

    /// The external program could not be started
    #[error("Tool not found: {command}")]
    ToolNotFound {
        /// Program name
        command: String,
    },

    /// The external program exited unsuccessfully
    #[error("'{command}' exited with {}", exit_description(.code))]
    ToolFailed {
        /// Full command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "a signal".to_string(),
    }
}

impl EdaError {
    /// Create an IO error tagged with the path being accessed.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an EDAM error from a message and optional source.
    pub fn edam<E>(message: impl Into<String>, source: Option<E>) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Edam {
            message: message.into(),
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Create an invalid-parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_parameter_error() {
        let err = EdaError::UnknownParameter {
            name: "seed".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown parameter 'seed'");
    }

    #[test]
    fn test_tool_failed_with_code() {
        let err = EdaError::ToolFailed {
            command: "make run".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "'make run' exited with code 2");
    }

    #[test]
    fn test_tool_failed_by_signal() {
        let err = EdaError::ToolFailed {
            command: "make".to_string(),
            code: None,
        };
        assert_eq!(err.to_string(), "'make' exited with a signal");
    }

    #[test]
    fn test_edam_error_without_source() {
        let err = EdaError::edam("missing name", None::<std::io::Error>);
        assert_eq!(err.to_string(), "Invalid EDAM description: missing name");
    }
}
