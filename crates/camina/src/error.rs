//! Error types for camina container operations.

/// Errors raised by container operations.
///
/// Every variant is scoped to the call that produced it: the container is
/// left exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum CaminaError {
    /// A referenced key (or value, for sequences) is absent.
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    /// A key collision the container's configuration forbids.
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },

    /// Input of a shape the container cannot hold.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// An ordinary insertion used a reserved wildcard key.
    #[error("reserved key: {key}")]
    ReservedKey { key: String },

    /// A positional reference past the end of a sequence.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// `subset` was called with neither an include nor an exclude list.
    #[error("subset requires an include or exclude selection")]
    EmptySelection,

    /// An operation a forwarding wrapper cannot perform.
    #[error("unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl CaminaError {
    pub(crate) fn key_not_found<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        Self::KeyNotFound {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn duplicate_key<K: std::fmt::Debug + ?Sized>(key: &K) -> Self {
        Self::DuplicateKey {
            key: format!("{key:?}"),
        }
    }

    pub(crate) fn type_mismatch(expected: &str, found: &serde_json::Value) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: json_kind(found).to_string(),
        }
    }
}

/// Short name of a JSON value's shape, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

pub type Result<T> = std::result::Result<T, CaminaError>;
