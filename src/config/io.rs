//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.puzzle-settle/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".puzzle-settle")
    }

    /// Get the global config file path (~/.puzzle-settle/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        for warning in config.validate() {
            tracing::warn!("{}: {}", path.display(), warning);
        }

        Ok(config)
    }

    /// Load configuration from a directory
    /// Looks for: .puzzle/settle.toml (preferred) or puzzle-settle.toml (legacy)
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let new_path = dir.join(".puzzle/settle.toml");
        if new_path.exists() {
            return Self::from_file(&new_path);
        }

        let legacy_path = dir.join("puzzle-settle.toml");
        if legacy_path.exists() {
            return Self::from_file(&legacy_path);
        }

        Ok(Self::default())
    }

    /// Load the global configuration, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let global_path = Self::global_config_path();
        if global_path.exists() {
            Self::from_file(&global_path)
        } else {
            tracing::debug!("No config at {}, using defaults", global_path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// An exclusive lock keeps two writers apart, and the temp file + rename
    /// means readers never observe a half-written file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        let lock_path = path.with_extension("toml.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

        lock_file
            .lock_exclusive()
            .with_context(|| "Failed to acquire config lock")?;

        let temp_path = path.with_extension("toml.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        temp_file
            .write_all(content.as_bytes())
            .with_context(|| "Failed to write config content")?;

        temp_file
            .sync_all()
            .with_context(|| "Failed to sync config file")?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

        // Lock is released when lock_file is dropped
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.leveling.max_level = 40;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.leveling.max_level, 40);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_from_dir_prefers_new_location() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".puzzle")).unwrap();
        std::fs::write(
            dir.path().join(".puzzle/settle.toml"),
            "[settlement]\nmax_attempts = 7\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("puzzle-settle.toml"),
            "[settlement]\nmax_attempts = 2\n",
        )
        .unwrap();

        let config = Config::from_dir(dir.path()).unwrap();
        assert_eq!(config.settlement.max_attempts, 7);
    }

    #[test]
    fn test_from_dir_without_file_is_default() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::from_dir(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[leveling\nmax_level = ").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
