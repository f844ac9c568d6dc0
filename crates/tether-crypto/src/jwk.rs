//! JWK-style public key values for the onboarding proof.

use rsa::traits::PublicKeyParts;
use serde::{Deserialize, Serialize};
use tether_common::encoding::{base64_encode, Alphabet};

use crate::error::CryptoError;
use crate::keys::parse_public_key;

/// Base64URL-encoded RSA public key components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyComponents {
    /// Modulus `n`, big-endian unsigned.
    pub modulus: String,
    /// Public exponent `e`, big-endian unsigned.
    pub exponent: String,
}

/// Extract `n` and `e` from a public key PEM and Base64URL-encode each.
pub fn extract_modulus_and_exponent(
    public_key_pem: &str,
) -> Result<PublicKeyComponents, CryptoError> {
    let public = parse_public_key(public_key_pem)?;

    let modulus = base64_encode(&public.n().to_bytes_be(), Alphabet::UrlSafe)?;
    let exponent = base64_encode(&public.e().to_bytes_be(), Alphabet::UrlSafe)?;

    Ok(PublicKeyComponents { modulus, exponent })
}

/// RSA public key in JSON Web Key form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    pub n: String,
    pub e: String,
}

impl Jwk {
    /// Build a signing JWK from a public key PEM.
    pub fn from_public_key_pem(public_key_pem: &str, kid: Option<&str>) -> Result<Self, CryptoError> {
        let PublicKeyComponents { modulus, exponent } =
            extract_modulus_and_exponent(public_key_pem)?;
        Ok(Self {
            kty: "RSA".to_string(),
            key_use: Some("sig".to_string()),
            kid: kid.map(str::to_string),
            n: modulus,
            e: exponent,
        })
    }

    pub fn to_json(&self) -> Result<String, CryptoError> {
        serde_json::to_string(self).map_err(|e| CryptoError::Serialization(e.to_string()))
    }
}
