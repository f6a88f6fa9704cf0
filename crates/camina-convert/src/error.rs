//! Error types for conversion helpers.

/// Errors raised when an input cannot be converted into the requested form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    /// Input is not a whole number.
    #[error("invalid integer: {input:?}")]
    InvalidInteger { input: String },

    /// Input is not an integer or floating point number.
    #[error("invalid number: {input:?}")]
    InvalidNumber { input: String },

    /// Input is not a recognized boolean spelling.
    #[error("invalid bool: {input:?}")]
    InvalidBool { input: String },

    /// Input cannot be rendered in the canonical form used for hashing.
    #[error("unserializable input: {reason}")]
    Unserializable { reason: String },
}
