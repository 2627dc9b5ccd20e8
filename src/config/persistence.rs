//! Configuration file persistence for blockport
//!
//! This module handles loading and saving the configuration file in the
//! platform-specific config directory, with graceful fallback to defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "blockport";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Backup configuration file name (used during atomic writes)
const CONFIG_BACKUP_NAME: &str = "config.json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\blockport\`
/// - **macOS**: `~/Library/Application Support/blockport/`
/// - **Linux**: `~/.config/blockport/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// # Behavior
///
/// 1. If the config file exists and is valid JSON, load and sanitize it
/// 2. If the config file doesn't exist, return default settings
/// 3. If the config file is corrupted/invalid, log a warning and return defaults
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| read_config(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load configuration from an explicit path, falling back to defaults.
pub fn load_config_from(path: &Path) -> Settings {
    read_config(path).unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

fn read_config(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|e| Error::ConfigLoad {
        path: config_path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|e| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            e
        );
        Error::from(e)
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(&get_config_file_path()?, settings)
}

/// Save configuration to `config_path`.
///
/// This performs an atomic write by writing a backup file next to the
/// target and renaming it over the original.
///
/// # Errors
///
/// - `Error::ConfigSave`: Failed to create the directory or write the file
pub fn save_config_to(config_path: &Path, settings: &Settings) -> Result<()> {
    let save_error = |path: &Path, e: Box<dyn std::error::Error + Send + Sync>| Error::ConfigSave {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(dir) = config_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating config directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|e| save_error(dir, Box::new(e)))?;
        }
    }

    let backup_path = config_path.with_file_name(CONFIG_BACKUP_NAME);
    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| save_error(config_path, Box::new(e)))?;

    fs::write(&backup_path, &json).map_err(|e| save_error(&backup_path, Box::new(e)))?;
    fs::rename(&backup_path, config_path).map_err(|e| save_error(config_path, Box::new(e)))?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Dialect;
    use tempfile::TempDir;

    /// Helper to create a test environment with a temporary config directory.
    struct TestEnv {
        _temp_dir: TempDir,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_file = temp_dir.path().join(APP_NAME).join(CONFIG_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            fs::create_dir_all(self.config_file.parent().unwrap()).expect("Failed to create config dir");
            fs::write(&self.config_file, content).expect("Failed to write config");
        }
    }

    #[test]
    fn test_get_config_file_path() {
        if let Ok(path) = get_config_file_path() {
            assert!(path.to_string_lossy().contains(APP_NAME));
            assert!(path.to_string_lossy().contains(CONFIG_FILE_NAME));
        }
    }

    #[test]
    fn test_load_missing_config_uses_defaults() {
        let env = TestEnv::new();
        assert_eq!(load_config_from(&env.config_file), Settings::default());
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let env = TestEnv::new();
        env.write_config("   \n");
        assert_eq!(load_config_from(&env.config_file), Settings::default());
    }

    #[test]
    fn test_load_corrupt_config_uses_defaults() {
        let env = TestEnv::new();
        env.write_config("{ not json");
        assert_eq!(load_config_from(&env.config_file), Settings::default());
    }

    #[test]
    fn test_read_corrupt_config_is_parse_error() {
        let env = TestEnv::new();
        env.write_config("{ not json");
        let err = read_config(&env.config_file).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { source: Some(_), .. }));
    }

    #[test]
    fn test_load_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"default_dialect": "whatsapp", "max_depth": 0}"#);

        let settings = load_config_from(&env.config_file);
        assert_eq!(settings.default_dialect, Dialect::WhatsApp);
        assert_eq!(settings.max_depth, Settings::MIN_DEPTH);
    }

    #[test]
    fn test_save_then_load() {
        let env = TestEnv::new();
        let settings = Settings {
            default_dialect: Dialect::RichText,
            fetch_timeout_ms: Some(1500),
            html_clipboard: false,
            ..Settings::default()
        };

        save_config_to(&env.config_file, &settings).unwrap();
        assert!(env.config_file.exists());
        assert!(!env.config_file.with_file_name(CONFIG_BACKUP_NAME).exists());
        assert_eq!(load_config_from(&env.config_file), settings);
    }
}
