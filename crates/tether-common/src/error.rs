use serde::{Deserialize, Serialize};

/// Machine-readable outcome kinds shared by every Tether crate.
///
/// Domain errors (`CodecError`, `CryptoError`, `StoreError`) each map onto
/// exactly one of these, so callers can tell "not onboarded yet" apart from
/// "credential material broken" without matching on domain types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    OutOfMemory,
    BadContentEncoding,
    Fail,
    NoStorageMedium,
    NoFileSupport,
    RegistrationInfoNotSaved,
    RegistrationInfoNotLoaded,
}

impl ErrorCode {
    /// Whether a caller above the core may reasonably retry.
    ///
    /// Only `Fail` qualifies: the onboarding layer may rotate keys or
    /// re-register. Capability and encoding errors are deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fail)
    }

    /// `RegistrationInfoNotLoaded` signals first run, not a fault.
    pub fn is_not_onboarded(&self) -> bool {
        matches!(self, Self::RegistrationInfoNotLoaded)
    }

    /// Process exit status used by the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Fail => 1,
            Self::OutOfMemory => 2,
            Self::BadContentEncoding => 3,
            Self::NoStorageMedium | Self::NoFileSupport => 4,
            Self::RegistrationInfoNotSaved => 5,
            Self::RegistrationInfoNotLoaded => 6,
        }
    }
}

impl From<&crate::encoding::CodecError> for ErrorCode {
    fn from(e: &crate::encoding::CodecError) -> Self {
        match e {
            crate::encoding::CodecError::OutOfMemory => Self::OutOfMemory,
            crate::encoding::CodecError::BadContentEncoding => Self::BadContentEncoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_serializes_to_snake_case() {
        assert_eq!(
            serde_json::to_value(ErrorCode::BadContentEncoding).unwrap(),
            "bad_content_encoding"
        );
        assert_eq!(
            serde_json::to_value(ErrorCode::RegistrationInfoNotLoaded).unwrap(),
            "registration_info_not_loaded"
        );
    }

    /// Exhaustive serde round-trip for all ErrorCode variants.
    #[test]
    fn all_error_code_variants_roundtrip_through_json() {
        let variants: Vec<(ErrorCode, &str)> = vec![
            (ErrorCode::OutOfMemory, "out_of_memory"),
            (ErrorCode::BadContentEncoding, "bad_content_encoding"),
            (ErrorCode::Fail, "fail"),
            (ErrorCode::NoStorageMedium, "no_storage_medium"),
            (ErrorCode::NoFileSupport, "no_file_support"),
            (ErrorCode::RegistrationInfoNotSaved, "registration_info_not_saved"),
            (ErrorCode::RegistrationInfoNotLoaded, "registration_info_not_loaded"),
        ];
        for (code, expected_str) in &variants {
            let serialized = serde_json::to_value(code).unwrap();
            assert_eq!(
                serialized, *expected_str,
                "{code:?} should serialize to \"{expected_str}\""
            );

            let deserialized: ErrorCode = serde_json::from_value(serialized).unwrap();
            assert_eq!(
                &deserialized, code,
                "\"{expected_str}\" should deserialize back to {code:?}"
            );
        }
    }

    #[test]
    fn only_fail_is_retryable() {
        assert!(ErrorCode::Fail.is_retryable());
        assert!(!ErrorCode::BadContentEncoding.is_retryable());
        assert!(!ErrorCode::NoStorageMedium.is_retryable());
        assert!(!ErrorCode::RegistrationInfoNotLoaded.is_retryable());
    }

    #[test]
    fn exit_codes_are_nonzero() {
        for code in [
            ErrorCode::OutOfMemory,
            ErrorCode::BadContentEncoding,
            ErrorCode::Fail,
            ErrorCode::NoStorageMedium,
            ErrorCode::NoFileSupport,
            ErrorCode::RegistrationInfoNotSaved,
            ErrorCode::RegistrationInfoNotLoaded,
        ] {
            assert_ne!(code.exit_code(), 0, "{code:?}");
        }
    }

    #[test]
    fn codec_errors_map_to_codes() {
        use crate::encoding::CodecError;
        assert_eq!(ErrorCode::from(&CodecError::OutOfMemory), ErrorCode::OutOfMemory);
        assert_eq!(
            ErrorCode::from(&CodecError::BadContentEncoding),
            ErrorCode::BadContentEncoding
        );
    }
}
