//! Column signatures for recognizing repeat layouts.

use sha2::{Digest, Sha256};

use metrics_registry::normalize_header;

/// Fingerprint of an ordered header list.
///
/// Headers are normalized before hashing so cosmetic differences
/// (casing, separators, stray whitespace) do not defeat template reuse,
/// while any change in column order or content produces a new
/// signature.
pub fn column_signature<S: AsRef<str>>(headers: &[S]) -> String {
    let mut hasher = Sha256::new();
    for header in headers {
        hasher.update(normalize_header(header.as_ref()).as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}
