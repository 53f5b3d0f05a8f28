//! Request fingerprints binding access tokens to the issuing client

use sha2::{Digest, Sha256};

use super::request_meta::RequestMetadata;

/// Derive the fingerprint of `subject` for the given request.
///
/// SHA-256 over `subject-userAgent-ip`, hex encoded. Deterministic and unsalted
/// so the verifying side can recompute it.
pub fn fingerprint(subject: &str, meta: &RequestMetadata) -> String {
    let mut hasher = Sha256::new();
    hasher.update(subject.as_bytes());
    hasher.update(b"-");
    hasher.update(meta.user_agent().as_bytes());
    hasher.update(b"-");
    hasher.update(meta.fingerprint_ip().as_bytes());
    format!("{:x}", hasher.finalize())
}
