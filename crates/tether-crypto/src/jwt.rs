//! Self-signed client assertion JWTs.
//!
//! The agent proves possession of its credentials by signing a short-lived
//! JWT: RS256 with the device private key, or HS256 with the client secret.
//! Segments are Base64URL with `=` padding kept, matching what the codec
//! produces everywhere else.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tether_common::encoding::{base64_decode, base64_encode, Alphabet};
use tether_common::types::SecurityProfile;

use crate::error::CryptoError;
use crate::hash::{digests_match, hmac_sha256};
use crate::random::generate_jti;
use crate::signing::{sign, verify_signature};

/// Secret used to sign an assertion. The variant fixes the algorithm.
#[derive(Clone, Copy)]
pub enum SigningCredential<'a> {
    SharedSecret { client_secret: &'a str },
    Rsa { private_key_pem: &'a str },
}

impl SigningCredential<'_> {
    pub fn profile(&self) -> SecurityProfile {
        match self {
            Self::SharedSecret { .. } => SecurityProfile::SharedSecret,
            Self::Rsa { .. } => SecurityProfile::Rsa3072,
        }
    }

    fn algorithm(&self) -> &'static str {
        match self {
            Self::SharedSecret { .. } => "HS256",
            Self::Rsa { .. } => "RS256",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub typ: String,
    pub alg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub iat: u64,
    pub nbf: u64,
    pub exp: u64,
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ten: Option<String>,
}

/// Builder for the client assertion sent during onboarding and token exchange.
#[derive(Debug, Clone)]
pub struct ClientAssertion {
    kid: Option<String>,
    claims: Claims,
}

impl ClientAssertion {
    /// Assertion issued at `issued_at` (Unix seconds), valid for `lifetime_secs`.
    /// Issuer and subject are both the client id.
    pub fn new(
        client_id: &str,
        audience: &str,
        issued_at: u64,
        lifetime_secs: u64,
    ) -> Result<Self, CryptoError> {
        Ok(Self {
            kid: None,
            claims: Claims {
                iss: client_id.to_string(),
                sub: client_id.to_string(),
                aud: audience.to_string(),
                iat: issued_at,
                nbf: issued_at,
                exp: issued_at.saturating_add(lifetime_secs),
                jti: generate_jti()?,
                schemas: None,
                ten: None,
            },
        })
    }

    /// Assertion issued now.
    pub fn now(client_id: &str, audience: &str, lifetime_secs: u64) -> Result<Self, CryptoError> {
        let issued_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self::new(client_id, audience, issued_at, lifetime_secs)
    }

    pub fn key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    pub fn tenant(mut self, tenant: impl Into<String>) -> Self {
        self.claims.ten = Some(tenant.into());
        self
    }

    pub fn schemas(mut self, schemas: Vec<String>) -> Self {
        self.claims.schemas = Some(schemas);
        self
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Serialize, encode and sign into compact `header.claims.signature` form.
    pub fn sign(&self, credential: SigningCredential<'_>) -> Result<String, CryptoError> {
        let header = Header {
            typ: "JWT".to_string(),
            alg: credential.algorithm().to_string(),
            kid: self.kid.clone(),
        };

        let header_json =
            serde_json::to_vec(&header).map_err(|e| CryptoError::Serialization(e.to_string()))?;
        let claims_json = serde_json::to_vec(&self.claims)
            .map_err(|e| CryptoError::Serialization(e.to_string()))?;

        let signing_input = format!(
            "{}.{}",
            base64_encode(&header_json, Alphabet::UrlSafe)?,
            base64_encode(&claims_json, Alphabet::UrlSafe)?
        );

        let signature = match credential {
            SigningCredential::SharedSecret { client_secret } => {
                hmac_sha256(client_secret.as_bytes(), signing_input.as_bytes())?.to_vec()
            }
            SigningCredential::Rsa { private_key_pem } => {
                sign(private_key_pem, signing_input.as_bytes())?
            }
        };

        tracing::debug!(
            alg = %header.alg,
            jti = %self.claims.jti,
            "Client assertion signed"
        );

        Ok(format!(
            "{signing_input}.{}",
            base64_encode(&signature, Alphabet::UrlSafe)?
        ))
    }
}

/// A compact JWT split into its decoded parts. No signature check is done.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub header: Header,
    pub claims: Claims,
    pub signature: Vec<u8>,
    signing_input: String,
}

impl DecodedToken {
    pub fn parse(token: &str) -> Result<Self, CryptoError> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CryptoError::Token("expected three segments".to_string()));
        };

        let header: Header = serde_json::from_slice(&base64_decode(header_b64, Alphabet::UrlSafe)?)
            .map_err(|e| CryptoError::Token(format!("header: {e}")))?;
        let claims: Claims = serde_json::from_slice(&base64_decode(claims_b64, Alphabet::UrlSafe)?)
            .map_err(|e| CryptoError::Token(format!("claims: {e}")))?;
        let signature = base64_decode(signature_b64, Alphabet::UrlSafe)?;

        Ok(Self {
            header,
            claims,
            signature,
            signing_input: format!("{header_b64}.{claims_b64}"),
        })
    }

    /// Check an RS256 token against the device public key.
    pub fn verify_rs256(&self, public_key_pem: &str) -> bool {
        self.header.alg == "RS256"
            && verify_signature(public_key_pem, self.signing_input.as_bytes(), &self.signature)
    }

    /// Check an HS256 token against the client secret.
    pub fn verify_hs256(&self, client_secret: &str) -> bool {
        if self.header.alg != "HS256" {
            return false;
        }
        match hmac_sha256(client_secret.as_bytes(), self.signing_input.as_bytes()) {
            Ok(expected) => digests_match(&expected, &self.signature),
            Err(_) => false,
        }
    }
}
