//! Dataset error types.
//!
//! Raised when a label in a dataset does not map onto one of the fixed
//! enumerations of the data model.

use thiserror::Error;

/// Errors that can occur when interpreting dataset labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The reading level label is not Independent, Instructional, or Frustration.
    #[error("unknown reading level: {0}")]
    UnknownReadingLevel(String),

    /// The gender label is not male or female.
    #[error("unknown gender: {0}")]
    UnknownGender(String),
}

impl DatasetError {
    /// The offending label.
    pub fn label(&self) -> &str {
        match self {
            DatasetError::UnknownReadingLevel(label) | DatasetError::UnknownGender(label) => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_label() {
        let err = DatasetError::UnknownReadingLevel("Advanced".into());
        assert_eq!(err.to_string(), "unknown reading level: Advanced");
        assert_eq!(err.label(), "Advanced");

        let err = DatasetError::UnknownGender("other".into());
        assert_eq!(err.to_string(), "unknown gender: other");
    }
}
