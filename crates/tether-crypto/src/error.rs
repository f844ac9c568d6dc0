use tether_common::encoding::CodecError;
use tether_common::error::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("key generation: {0}")]
    KeyGeneration(String),
    #[error("key encoding: {0}")]
    KeyEncoding(String),
    #[error("signing: {0}")]
    Signing(String),
    #[error("random generator unavailable: {0}")]
    Random(String),
    #[error("malformed token: {0}")]
    Token(String),
    #[error("serialization: {0}")]
    Serialization(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl From<&CryptoError> for ErrorCode {
    fn from(e: &CryptoError) -> Self {
        match e {
            CryptoError::Codec(inner) => ErrorCode::from(inner),
            _ => ErrorCode::Fail,
        }
    }
}
