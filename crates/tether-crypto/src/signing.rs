//! RSASSA-PKCS1-v1_5 / SHA-256 request signing.
//!
//! The payload is hashed first and only the digest goes to the RSA
//! primitive; the raw payload is never signed directly.

use rsa::traits::PublicKeyParts;
use rsa::Pkcs1v15Sign;
use sha2::Sha256;

use crate::error::CryptoError;
use crate::hash::hash_sha256;
use crate::keys::{parse_private_key, parse_public_key};

/// Sign `data` with the PKCS#1 PEM private key.
///
/// The signature is exactly the modulus length (384 bytes for RSA-3072).
pub fn sign(private_key_pem: &str, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let key = parse_private_key(private_key_pem)?;
    let digest = hash_sha256(data);

    let signature = key
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;

    if signature.len() != key.size() {
        return Err(CryptoError::Signing(format!(
            "signature length {} does not match modulus length {}",
            signature.len(),
            key.size()
        )));
    }

    tracing::trace!(len = signature.len(), "Payload signed");
    Ok(signature)
}

/// Verify an RSA-SHA256 signature against a public key in PEM format.
///
/// Returns `true` if the signature is valid for the given data and key.
pub fn verify_signature(public_key_pem: &str, data: &[u8], signature: &[u8]) -> bool {
    let public = match parse_public_key(public_key_pem) {
        Ok(k) => k,
        Err(_) => return false,
    };

    let digest = hash_sha256(data);
    public
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}
