use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Authentication mechanism the agent onboards with.
///
/// Chosen at configuration time; decides which credential layout is stored
/// and which signing path produces request proofs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityProfile {
    /// Symmetric `client_secret`, proofs are HMAC-SHA256.
    SharedSecret,
    /// RSA-3072 key pair, proofs are RSASSA-PKCS1-v1_5 / SHA-256.
    #[default]
    Rsa3072,
}

impl SecurityProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SharedSecret => "shared_secret",
            Self::Rsa3072 => "rsa_3072",
        }
    }
}

impl fmt::Display for SecurityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown security profile: {0} (expected shared_secret or rsa_3072)")]
pub struct ProfileParseError(pub String);

impl FromStr for SecurityProfile {
    type Err = ProfileParseError;

    /// Accepts `shared_secret` / `rsa_3072` and the dashed or short forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "shared_secret" | "shared" | "secret" => Ok(Self::SharedSecret),
            "rsa_3072" | "rsa3072" | "rsa" => Ok(Self::Rsa3072),
            _ => Err(ProfileParseError(s.to_string())),
        }
    }
}
