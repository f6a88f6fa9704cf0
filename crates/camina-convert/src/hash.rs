//! Stable content digests.

use crate::error::ConvertError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 hex digest of `item`'s JSON form.
///
/// Map keys serialize in their container's order, so values held in
/// `BTreeMap`s hash identically across runs. Values with no JSON form (maps
/// with non-string keys, failing `Serialize` impls) are rejected.
pub fn hashify<T: Serialize + ?Sized>(item: &T) -> Result<String, ConvertError> {
    let canonical = serde_json::to_vec(item).map_err(|err| ConvertError::Unserializable {
        reason: err.to_string(),
    })?;
    let hash = Sha256::digest(&canonical);
    Ok(format!("{hash:x}"))
}
