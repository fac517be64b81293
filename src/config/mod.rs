use crate::core::identity::IdScheme;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::utils::path::{expand_tilde, resolve_in};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Which storage backend the roster lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// SQLite document store
    #[default]
    Document,
    /// Single JSON key-value file
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_local_store")]
    pub local_store: String,
    #[serde(default)]
    pub storage: StorageKind,
    #[serde(default)]
    pub id_scheme: IdScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
    #[serde(default)]
    pub default_export_format: ExportFormat,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_local_store() -> String {
    Config::local_store_file().to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            local_store: default_local_store(),
            storage: StorageKind::default(),
            id_scheme: IdScheme::default(),
            export_dir: None,
            default_export_format: ExportFormat::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("cadetroster")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".cadetroster")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("cadetroster.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("cadetroster.sqlite")
    }

    pub fn local_store_file() -> PathBuf {
        Self::config_dir().join("cadetroster.json")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.local_store = expand_tilde(&cfg.local_store).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Path of the store selected by `storage`.
    pub fn active_store_path(&self) -> &str {
        match self.storage {
            StorageKind::Document => &self.database,
            StorageKind::Local => &self.local_store,
        }
    }

    /// Point the selected backend at `path` (the global `--db` flag).
    pub fn override_store_path(&mut self, path: &str) {
        let expanded = expand_tilde(path).to_string_lossy().to_string();
        match self.storage {
            StorageKind::Document => self.database = expanded,
            StorageKind::Local => self.local_store = expanded,
        }
    }

    /// Build the initial configuration. A custom store name that is not an
    /// absolute path is placed in the config directory. In test mode the
    /// config file is left untouched.
    pub fn init_all(custom_name: Option<&str>, is_test: bool, storage: StorageKind) -> AppResult<Self> {
        let dir = Self::config_dir();
        let mut cfg = Self {
            storage,
            ..Self::default()
        };

        if let Some(name) = custom_name {
            let path = resolve_in(&dir, name).to_string_lossy().to_string();
            match storage {
                StorageKind::Document => cfg.database = path,
                StorageKind::Local => cfg.local_store = path,
            }
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&cfg)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(AppError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = Config::from_yaml("storage: local\nid_scheme: sequence\n").unwrap();
        assert_eq!(cfg.storage, StorageKind::Local);
        assert_eq!(cfg.id_scheme, IdScheme::Sequence);
        assert_eq!(cfg.default_export_format, ExportFormat::Xlsx);
        assert!(cfg.export_dir.is_none());
        assert!(cfg.database.ends_with("cadetroster.sqlite"));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = Config::from_yaml("storage: [nope").unwrap_err();
        assert!(matches!(err, AppError::ConfigParse(_)));
    }

    #[test]
    fn override_targets_selected_backend() {
        let mut cfg = Config {
            storage: StorageKind::Local,
            ..Config::default()
        };
        cfg.override_store_path("/tmp/roster.json");
        assert_eq!(cfg.local_store, "/tmp/roster.json");
        assert_eq!(cfg.active_store_path(), "/tmp/roster.json");
        assert!(cfg.database.ends_with("cadetroster.sqlite"));
    }

    #[test]
    fn yaml_round_trip_keeps_lowercase_enums() {
        let yaml = Config::default().to_yaml().unwrap();
        assert!(yaml.contains("storage: document"));
        assert!(yaml.contains("id_scheme: derived"));
        assert!(yaml.contains("default_export_format: xlsx"));
    }
}
