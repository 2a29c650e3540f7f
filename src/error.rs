use std::fmt;

/// Result type for Minerva operations
pub type Result<T> = std::result::Result<T, MinervaError>;

/// Main error type for the Minerva library
#[derive(Debug, Clone)]
pub enum MinervaError {
    /// Invalid dimensions for operations
    DimensionMismatch {
        expected: String,
        actual: String,
    },

    /// Invalid parameter value
    InvalidParameter {
        name: String,
        reason: String,
    },

    /// Backward-pass operation requested on an inference-only layer
    NotTrainable(String),

    /// IO errors (file operations)
    IoError(String),

    /// Truncated or malformed persisted state
    PersistenceError(String),

    /// Activation-function identifier could not be resolved during load
    UnknownActivation {
        name: String,
    },
}

impl fmt::Display for MinervaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinervaError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, actual)
            }
            MinervaError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{}': {}", name, reason)
            }
            MinervaError::NotTrainable(msg) => write!(f, "Not trainable: {}", msg),
            MinervaError::IoError(msg) => write!(f, "IO error: {}", msg),
            MinervaError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
            MinervaError::UnknownActivation { name } => {
                write!(f, "Unknown activation function identifier '{}'", name)
            }
        }
    }
}

impl std::error::Error for MinervaError {}

// Conversion from std::io::Error
impl From<std::io::Error> for MinervaError {
    fn from(err: std::io::Error) -> Self {
        MinervaError::IoError(err.to_string())
    }
}

// Helper functions for common error patterns
impl MinervaError {
    pub fn dimension_mismatch<S: Into<String>>(expected: S, actual: S) -> Self {
        MinervaError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid_parameter<S: Into<String>>(name: S, reason: S) -> Self {
        MinervaError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        MinervaError::PersistenceError(msg.into())
    }
}
