//! Registration records produced by onboarding.

use std::fmt;

use serde::Serialize;
use tether_common::types::SecurityProfile;
use tether_crypto::jwt::SigningCredential;
use tether_crypto::keys::generate_keypair;
use tether_crypto::KeyMaterial;
use zeroize::Zeroize;

use crate::error::StoreError;

/// Profile-specific secret half of a registration.
///
/// A record holds exactly one of these, so a shared-secret record can
/// never carry key material and vice versa.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    SharedSecret { client_secret: String },
    Rsa(KeyMaterial),
}

impl Credential {
    pub fn profile(&self) -> SecurityProfile {
        match self {
            Self::SharedSecret { .. } => SecurityProfile::SharedSecret,
            Self::Rsa(_) => SecurityProfile::Rsa3072,
        }
    }
}

/// Credentials issued to the device by a successful onboarding.
///
/// Overwritten wholesale on key rotation; secrets are zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub client_id: String,
    pub credential: Credential,
    pub registration_access_token: String,
    pub registration_uri: String,
}

impl RegistrationRecord {
    pub fn shared_secret(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        registration_access_token: impl Into<String>,
        registration_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            credential: Credential::SharedSecret {
                client_secret: client_secret.into(),
            },
            registration_access_token: registration_access_token.into(),
            registration_uri: registration_uri.into(),
        }
    }

    pub fn rsa(
        client_id: impl Into<String>,
        keys: KeyMaterial,
        registration_access_token: impl Into<String>,
        registration_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            credential: Credential::Rsa(keys),
            registration_access_token: registration_access_token.into(),
            registration_uri: registration_uri.into(),
        }
    }

    pub fn profile(&self) -> SecurityProfile {
        self.credential.profile()
    }

    pub fn client_secret(&self) -> Option<&str> {
        match &self.credential {
            Credential::SharedSecret { client_secret } => Some(client_secret),
            Credential::Rsa(_) => None,
        }
    }

    pub fn key_material(&self) -> Option<&KeyMaterial> {
        match &self.credential {
            Credential::SharedSecret { .. } => None,
            Credential::Rsa(keys) => Some(keys),
        }
    }

    /// Secret used to sign client assertions for this record.
    pub fn signing_credential(&self) -> SigningCredential<'_> {
        match &self.credential {
            Credential::SharedSecret { client_secret } => {
                SigningCredential::SharedSecret { client_secret }
            }
            Credential::Rsa(keys) => SigningCredential::Rsa {
                private_key_pem: keys.private_key(),
            },
        }
    }

    /// Same identity with freshly generated RSA key material.
    ///
    /// Only RSA records rotate locally; a shared secret is reissued by the
    /// server instead.
    pub fn rotate_keys(&self) -> Result<Self, StoreError> {
        if self.profile() != SecurityProfile::Rsa3072 {
            return Err(StoreError::ProfileMismatch {
                expected: SecurityProfile::Rsa3072,
                found: self.profile(),
            });
        }
        let keys = generate_keypair()?;
        tracing::info!(client_id = %self.client_id, "Device keys rotated");
        Ok(Self::rsa(
            self.client_id.clone(),
            keys,
            self.registration_access_token.clone(),
            self.registration_uri.clone(),
        ))
    }

    /// Display-safe view with secrets removed.
    pub fn summary(&self) -> RecordSummary {
        RecordSummary {
            profile: self.profile(),
            client_id: self.client_id.clone(),
            registration_uri: self.registration_uri.clone(),
            public_key: self.key_material().map(|k| k.public_key().to_string()),
        }
    }
}

impl Drop for RegistrationRecord {
    fn drop(&mut self) {
        self.registration_access_token.zeroize();
        if let Credential::SharedSecret { client_secret } = &mut self.credential {
            client_secret.zeroize();
        }
        // KeyMaterial zeroizes itself.
    }
}

impl fmt::Debug for RegistrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRecord")
            .field("profile", &self.profile())
            .field("client_id", &self.client_id)
            .field("registration_uri", &self.registration_uri)
            .finish_non_exhaustive()
    }
}

/// Non-secret fields of a record, for status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub profile: SecurityProfile,
    pub client_id: String,
    pub registration_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}
