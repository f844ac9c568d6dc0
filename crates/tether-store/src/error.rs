//! Credential store error types.

use std::path::PathBuf;

use tether_common::error::ErrorCode;
use tether_common::types::SecurityProfile;
use tether_crypto::CryptoError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no storage medium available")]
    NoStorageMedium,

    #[error("no file system support")]
    NoFileSupport,

    #[error("registration info not saved to {path}: {source}")]
    NotSaved {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registration field `{field}` {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("no registration info at {path}; device is not onboarded yet")]
    Missing { path: PathBuf },

    #[error("registration info not loaded from {path}: {reason}")]
    NotLoaded { path: PathBuf, reason: String },

    #[error("expected a {expected} record, found {found}")]
    ProfileMismatch {
        expected: SecurityProfile,
        found: SecurityProfile,
    },

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl StoreError {
    /// The device has never been onboarded (no credential file yet).
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }
}

impl From<&StoreError> for ErrorCode {
    fn from(e: &StoreError) -> Self {
        match e {
            StoreError::NoStorageMedium => ErrorCode::NoStorageMedium,
            StoreError::NoFileSupport => ErrorCode::NoFileSupport,
            StoreError::NotSaved { .. } | StoreError::InvalidField { .. } => {
                ErrorCode::RegistrationInfoNotSaved
            }
            StoreError::Missing { .. } | StoreError::NotLoaded { .. } => {
                ErrorCode::RegistrationInfoNotLoaded
            }
            StoreError::ProfileMismatch { .. } => ErrorCode::Fail,
            StoreError::Crypto(inner) => ErrorCode::from(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_codes() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let cases: Vec<(StoreError, ErrorCode)> = vec![
            (StoreError::NoStorageMedium, ErrorCode::NoStorageMedium),
            (StoreError::NoFileSupport, ErrorCode::NoFileSupport),
            (
                StoreError::NotSaved {
                    path: PathBuf::from("x"),
                    source: io(),
                },
                ErrorCode::RegistrationInfoNotSaved,
            ),
            (
                StoreError::InvalidField {
                    field: "client_id",
                    reason: "must not contain a line break",
                },
                ErrorCode::RegistrationInfoNotSaved,
            ),
            (
                StoreError::Missing {
                    path: PathBuf::from("x"),
                },
                ErrorCode::RegistrationInfoNotLoaded,
            ),
            (
                StoreError::NotLoaded {
                    path: PathBuf::from("x"),
                    reason: "truncated".into(),
                },
                ErrorCode::RegistrationInfoNotLoaded,
            ),
            (
                StoreError::ProfileMismatch {
                    expected: SecurityProfile::Rsa3072,
                    found: SecurityProfile::SharedSecret,
                },
                ErrorCode::Fail,
            ),
            (
                StoreError::Crypto(CryptoError::KeyGeneration("x".into())),
                ErrorCode::Fail,
            ),
        ];
        for (error, expected) in &cases {
            assert_eq!(ErrorCode::from(error), *expected, "{error}");
        }
    }

    #[test]
    fn only_missing_is_missing() {
        assert!(StoreError::Missing {
            path: PathBuf::from("x")
        }
        .is_missing());
        assert!(!StoreError::NoFileSupport.is_missing());
    }
}
