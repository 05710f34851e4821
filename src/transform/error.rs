//! Error types for object transformation

use thiserror::Error;

/// Errors that abort the conversion of an object
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// No name could be derived for an object
    #[error("{object_type} defined on line {line} has no name: {reason}")]
    Identity {
        object_type: String,
        line: usize,
        reason: String,
    },

    /// A property that must be numeric is not
    #[error("cannot convert '{key}' of {object_type} '{name}': '{value}' is not {expected}")]
    Conversion {
        object_type: String,
        name: String,
        key: String,
        value: String,
        expected: &'static str,
    },
}

impl TransformError {
    /// Create an identity error
    pub fn identity(object_type: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        Self::Identity {
            object_type: object_type.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create a numeric conversion error
    pub fn conversion(
        object_type: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::Conversion {
            object_type: object_type.into(),
            name: name.into(),
            key: key.into(),
            value: value.into(),
            expected,
        }
    }
}
