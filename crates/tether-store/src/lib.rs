//! Tether Store — registration credential persistence.
//!
//! Saves the record produced by onboarding to a flat text file and
//! reloads it on the next start. The layout depends on the security
//! profile: four plain lines for shared-secret records, or plain lines
//! around two PEM blocks for RSA records.

pub mod error;
mod reader;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use record::{Credential, RecordSummary, RegistrationRecord};
pub use store::CredentialStore;
