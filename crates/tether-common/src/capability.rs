use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// Summary of a capability's current state for `tether status`.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityStatus {
    pub name: String,
    pub summary: String,
    pub healthy: bool,
}

/// Trait implemented by each subsystem to participate in `tether status`.
pub trait Capability: Send + Sync {
    fn name(&self) -> &str;
    fn status(&self) -> CapabilityStatus;
}

/// Storage features available on the device, decided at configuration time.
///
/// Credential persistence checks this before touching any path so the
/// same binary can run on targets without a storage medium or file system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageCapability {
    #[serde(default = "enabled")]
    pub medium: bool,
    #[serde(default = "enabled")]
    pub file_system: bool,
}

fn enabled() -> bool {
    true
}

impl Default for StorageCapability {
    fn default() -> Self {
        Self {
            medium: true,
            file_system: true,
        }
    }
}

impl StorageCapability {
    /// No storage at all (e.g. RAM-only targets).
    pub const fn none() -> Self {
        Self {
            medium: false,
            file_system: false,
        }
    }

    /// `Ok` when files can be read and written, otherwise the missing capability.
    /// The medium is checked first.
    pub fn check(&self) -> Result<(), ErrorCode> {
        if !self.medium {
            return Err(ErrorCode::NoStorageMedium);
        }
        if !self.file_system {
            return Err(ErrorCode::NoFileSupport);
        }
        Ok(())
    }
}

impl Capability for StorageCapability {
    fn name(&self) -> &str {
        "storage"
    }

    fn status(&self) -> CapabilityStatus {
        let (summary, healthy) = match self.check() {
            Ok(()) => ("file system available".to_string(), true),
            Err(ErrorCode::NoStorageMedium) => ("no storage medium".to_string(), false),
            Err(_) => ("no file system support".to_string(), false),
        };
        CapabilityStatus {
            name: self.name().to_string(),
            summary,
            healthy,
        }
    }
}
