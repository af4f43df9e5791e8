//! Binary Conversion Error Types
//!
//! Every failure is a value-level result; nothing here is fatal to the process.

use thiserror::Error;

use crate::bytes::ByteOrder;

/// Result type for voltage-binary operations
pub type Result<T> = std::result::Result<T, BinaryError>;

/// Binary conversion errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BinaryError {
    /// A read asked for more bytes than the stream has left
    #[error("Insufficient data: requested {requested} byte(s), {available} available")]
    InsufficientData { requested: usize, available: usize },

    /// Seek or peek addressed a position outside the stream
    #[error("Out of range: position {position} outside stream of length {length}")]
    OutOfRange { position: i64, length: usize },

    /// Bytes of the right length that do not form a valid value
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A dynamic value has no binary encoding
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The same field name appears twice in one layout
    #[error("Duplicate field in layout: {0}")]
    DuplicateField(String),

    /// A record has no field with this name
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// A dynamic value holds a different type than requested
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The process-wide default byte order was already fixed
    #[error("Default byte order already set to {current}")]
    DefaultAlreadySet { current: ByteOrder },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for BinaryError {
    fn from(err: figment::Error) -> Self {
        BinaryError::Config(err.to_string())
    }
}

// Helper methods for creating errors
impl BinaryError {
    pub fn insufficient_data(requested: usize, available: usize) -> Self {
        BinaryError::InsufficientData {
            requested,
            available,
        }
    }

    pub fn out_of_range(position: i64, length: usize) -> Self {
        BinaryError::OutOfRange { position, length }
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        BinaryError::InvalidData(msg.into())
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        BinaryError::UnsupportedType(kind.into())
    }

    pub fn duplicate_field(name: impl Into<String>) -> Self {
        BinaryError::DuplicateField(name.into())
    }

    pub fn field_not_found(name: impl Into<String>) -> Self {
        BinaryError::FieldNotFound(name.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        BinaryError::Config(msg.into())
    }

    /// Check if retrying with a longer input could succeed
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, BinaryError::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BinaryError::insufficient_data(4, 1).to_string(),
            "Insufficient data: requested 4 byte(s), 1 available"
        );
        assert_eq!(
            BinaryError::out_of_range(-1, 8).to_string(),
            "Out of range: position -1 outside stream of length 8"
        );
        assert_eq!(
            BinaryError::duplicate_field("id").to_string(),
            "Duplicate field in layout: id"
        );
    }

    #[test]
    fn test_is_insufficient_data() {
        assert!(BinaryError::insufficient_data(2, 0).is_insufficient_data());
        assert!(!BinaryError::unsupported("record").is_insufficient_data());
    }
}
