//! Tether Common — pieces shared by every Tether crate.
//!
//! The Base64 codec, the cross-crate error taxonomy, runtime storage
//! capabilities, the security profile type and data-directory paths.

pub mod capability;
pub mod encoding;
pub mod error;
pub mod paths;
pub mod types;
