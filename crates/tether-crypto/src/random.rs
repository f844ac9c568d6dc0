//! CSPRNG output for nonces and token identifiers.
//!
//! `OsRng` reads straight from the operating system generator and holds no
//! state of its own, so it may be used from several threads at once.

use rand::rngs::OsRng;
use rand::RngCore;
use tether_common::encoding::hex_encode;
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Bytes of randomness behind a JWT `jti`.
const JTI_LEN: usize = 16;

/// Fill `buffer` with CSPRNG bytes.
///
/// On failure `buffer` is left exactly as it was.
pub fn generate_random_bytes(buffer: &mut [u8]) -> Result<(), CryptoError> {
    let mut scratch = Zeroizing::new(vec![0u8; buffer.len()]);
    OsRng
        .try_fill_bytes(&mut scratch)
        .map_err(|e| CryptoError::Random(e.to_string()))?;
    buffer.copy_from_slice(&scratch);
    Ok(())
}

/// Fixed-size variant of [`generate_random_bytes`].
pub fn random_array<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut out = [0u8; N];
    generate_random_bytes(&mut out)?;
    Ok(out)
}

/// Fresh JWT identifier: 16 random bytes as 32 lowercase hex characters.
pub fn generate_jti() -> Result<String, CryptoError> {
    let bytes = random_array::<JTI_LEN>()?;
    Ok(hex_encode(&bytes))
}
