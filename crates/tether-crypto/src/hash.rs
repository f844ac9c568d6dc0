//! SHA-256 digests and HMAC-SHA256 proofs.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::CryptoError;

/// SHA-256 digest length in bytes.
pub const SHA256_LEN: usize = 32;

/// Compute the SHA-256 digest of `data`.
pub fn hash_sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    let digest = Sha256::digest(data);
    let mut out = [0u8; SHA256_LEN];
    out.copy_from_slice(&digest);
    out
}

/// HMAC-SHA256 of `data` under `key`, used for shared-secret proofs.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; SHA256_LEN], CryptoError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| CryptoError::Signing(format!("HMAC key: {e}")))?;
    mac.update(data);
    let tag = mac.finalize().into_bytes();
    let mut out = [0u8; SHA256_LEN];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Compare two digests or MACs in constant time.
pub fn digests_match(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
