//! Runtime configuration
//!
//! Loaded from `campus.toml` in the platform config directory, or from the
//! path in `CAMPUS_CONFIG`. Every key is optional.
//!
//! ```toml
//! [storage]
//! path = "/var/lib/campus/campus.db"
//! in_memory = false
//!
//! [server]
//! bind = "127.0.0.1:7341"
//!
//! [seed]
//! demo = true
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::seed::Seed;
use crate::service::CampusService;
use crate::storage::{Database, MemoryBlobStore};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "CAMPUS_CONFIG";

/// Default listen address for the campus server
pub const DEFAULT_BIND: &str = "127.0.0.1:7341";

const CONFIG_FILE: &str = "campus.toml";
const DATABASE_FILE: &str = "campus.db";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CampusConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite file. Defaults to `campus.db` in the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Keep everything in memory; nothing survives a restart
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    /// Seed empty collections with the demo campus
    #[serde(default = "default_true")]
    pub demo: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo: true }
    }
}

fn default_true() -> bool {
    true
}

impl CampusConfig {
    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from `CAMPUS_CONFIG` or the platform config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }

    /// Database file to open, resolving the platform default
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DATABASE_FILE)),
        }
    }

    pub fn seed(&self) -> Seed {
        if self.seed.demo {
            Seed::demo()
        } else {
            Seed::empty()
        }
    }

    /// Build the service this configuration describes
    pub fn open_service(&self) -> Result<CampusService> {
        if self.storage.in_memory {
            info!("Using in-memory store");
            return Ok(CampusService::new(MemoryBlobStore::new(), self.seed()));
        }

        let path = self.database_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&path)?;
        Ok(CampusService::new(db, self.seed()))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("edu", "campus", "campus-connect")
        .ok_or_else(|| Error::Config("could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = CampusConfig::from_toml("").unwrap();
        assert_eq!(config, CampusConfig::default());
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert!(config.seed.demo);
        assert!(!config.storage.in_memory);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[storage]
path = "/tmp/campus-test.db"

[server]
bind = "0.0.0.0:9000"

[seed]
demo = false
"#;
        let config = CampusConfig::from_toml(toml).unwrap();
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/campus-test.db")
        );
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.seed(), Seed::empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CampusConfig::from_toml("[server]\nport = 1\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CampusConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CampusConfig::default());
    }

    #[test]
    fn test_open_service_on_disk() {
        let dir = TempDir::new().unwrap();
        let config = CampusConfig {
            storage: StorageConfig {
                path: Some(dir.path().join("nested").join("campus.db")),
                in_memory: false,
            },
            ..CampusConfig::default()
        };

        let mut service = config.open_service().unwrap();
        assert_eq!(service.list_events().unwrap().len(), 7);
        assert!(dir.path().join("nested").join("campus.db").exists());
    }
}
