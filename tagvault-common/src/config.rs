//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Default HTTP port for tagvault-server
pub const DEFAULT_PORT: u16 = 5740;

/// TOML configuration file contents (`~/.config/tagvault/config.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding the database and the object store directory
    pub root_folder: Option<String>,
    /// HTTP listen port
    pub port: Option<u16>,
}

/// Root folder resolution priority order:
/// 1. Environment variable `TAGVAULT_ROOT_FOLDER` (highest priority)
/// 2. TOML config file
/// 3. OS-dependent compiled default (fallback)
pub fn resolve_root_folder() -> PathBuf {
    if let Ok(path) = std::env::var("TAGVAULT_ROOT_FOLDER") {
        return PathBuf::from(path);
    }

    if let Ok(config) = load_toml_config() {
        if let Some(root_folder) = config.root_folder {
            return PathBuf::from(root_folder);
        }
    }

    default_root_folder()
}

/// HTTP port resolution: `TAGVAULT_PORT` env var, then TOML, then default
pub fn resolve_port() -> u16 {
    if let Ok(port) = std::env::var("TAGVAULT_PORT") {
        if let Ok(port) = port.parse() {
            return port;
        }
        tracing::warn!("Ignoring unparseable TAGVAULT_PORT value: {}", port);
    }

    if let Ok(config) = load_toml_config() {
        if let Some(port) = config.port {
            return port;
        }
    }

    DEFAULT_PORT
}

/// Load TOML config from the platform config directory
pub fn load_toml_config() -> Result<TomlConfig> {
    let path = config_file_path()?;
    if !path.exists() {
        return Err(Error::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Platform config file path (`<config dir>/tagvault/config.toml`)
fn config_file_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("tagvault").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("tagvault"))
        .unwrap_or_else(|| PathBuf::from("./tagvault_data"))
}

/// Ensure the root folder (and the object store subdirectory) exist
pub fn ensure_root_folder(root: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(root)?;
    std::fs::create_dir_all(root.join("objects"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_used_when_nothing_configured() {
        // Environment is not set in the test harness
        assert_eq!(DEFAULT_PORT, 5740);
    }

    #[test]
    fn ensure_root_folder_creates_objects_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let root = tmp.path().join("vault");
        ensure_root_folder(&root).unwrap();
        assert!(root.join("objects").is_dir());
    }
}
