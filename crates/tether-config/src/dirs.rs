//! Tether data directory initialization.
//!
//! Ensures the `~/.tether/` directory exists and contains a default
//! `config.toml` if not already present.

use tether_common::paths;

/// Default content for a freshly created config.toml.
const DEFAULT_CONFIG_TOML: &str = "\
# Tether agent configuration

# Authentication mechanism: \"rsa_3072\" or \"shared_secret\"
# security_profile = \"rsa_3072\"

# Registration file (relative paths resolve against this directory)
# credentials_path = \"registration.txt\"

# Audience claim for client assertions
# token_audience = \"https://gateway.example.com/api/agentmanagement/v3/oauth/token\"
# assertion_lifetime_secs = 300

# [storage]
# medium = true
# file_system = true
";

/// Ensure the Tether data directory structure exists.
///
/// Creates:
/// - `~/.tether/` (or platform equivalent)
/// - `~/.tether/config.toml` (if not already present)
/// - `~/.tether/logs/`
///
/// Errors are logged but not fatal; commands that need the directory
/// report their own errors.
pub fn ensure_data_dir() {
    let data_dir = paths::tether_data_dir();

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        tracing::warn!(
            path = %data_dir.display(),
            error = %e,
            "Could not create data directory"
        );
        return;
    }

    let log_dir = paths::tether_log_dir();
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        tracing::warn!(
            path = %log_dir.display(),
            error = %e,
            "Could not create log directory"
        );
    }

    let config_path = paths::config_path();
    if !config_path.exists() {
        match std::fs::write(&config_path, DEFAULT_CONFIG_TOML) {
            Ok(()) => tracing::debug!(path = %config_path.display(), "Created default config"),
            Err(e) => tracing::warn!(
                path = %config_path.display(),
                error = %e,
                "Could not write default config"
            ),
        }
    }

    tracing::debug!(path = %data_dir.display(), "Data directory ready");
}
