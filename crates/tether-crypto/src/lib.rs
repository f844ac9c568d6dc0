//! Tether Crypto — device credential cryptography.
//!
//! RSA-3072 key generation with PEM export, RSA-SHA256 signing and
//! verification, SHA-256 / HMAC-SHA256, CSPRNG bytes, and the JWK and
//! client-assertion JWT forms built on top of them.

pub mod error;
pub mod hash;
pub mod jwk;
pub mod jwt;
pub mod keys;
pub mod random;
pub mod signing;

pub use error::CryptoError;
pub use keys::{generate_keypair, KeyMaterial};
pub use signing::{sign, verify_signature};
