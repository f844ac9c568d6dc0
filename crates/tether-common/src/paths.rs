use std::path::PathBuf;

/// Root data directory for Tether.
///
/// Holds `config.toml`, the registration credentials and logs. All of it
/// is machine-local device identity and must not roam.
///
/// - Linux: `~/.tether/`
/// - macOS: `~/Library/Application Support/tether/`
/// - Windows: `%LOCALAPPDATA%\tether\`
///
/// `TETHER_DATA_DIR` overrides the platform default.
pub fn tether_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("TETHER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("tether");
        }
    }

    #[cfg(windows)]
    {
        if let Some(local) = std::env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local).join("tether");
        }
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".tether");
        }
    }

    // Fallback
    PathBuf::from(".tether")
}

/// Default registration credentials file.
pub fn credentials_path() -> PathBuf {
    tether_data_dir().join("registration.txt")
}

/// Log directory.
pub fn tether_log_dir() -> PathBuf {
    tether_data_dir().join("logs")
}

/// Path to `config.toml`.
pub fn config_path() -> PathBuf {
    tether_data_dir().join("config.toml")
}
