//! Error types for device-graph construction and rendering.
//!
//! Every failure in the core is local and synchronous: generation either
//! completes or aborts with one of these variants before anything is written.

/// Result alias used throughout the library core
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while building or reading a configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Parameter '{key}' not found on device '{device}'")]
    KeyNotFound { device: String, key: String },

    #[error("Device name '{0}' is already registered")]
    DuplicateName(String),

    #[error("Connection references unregistered device '{name}'")]
    UnknownReference { name: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("'{0}' is a reserved device attribute and cannot be set as a parameter")]
    ReservedName(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl ConfigError {
    /// Shorthand for building an `InvalidParameter` error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}
