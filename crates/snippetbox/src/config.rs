use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use snippetbox_storage::{BackendType, StorageConfig};
use std::path::{Path, PathBuf};

/// Environment variable holding the database URL
pub const DATABASE_URL_ENV: &str = "SNIPPETBOX_DATABASE_URL";

const DEFAULT_DATABASE_FILE: &str = "snippets.sqlite";

/// Resolved CLI configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub source: ConfigSource,
}

/// Where the database URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Flag,
    Env,
    File,
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConfigSource::Flag => "--database-url",
            ConfigSource::Env => DATABASE_URL_ENV,
            ConfigSource::File => "config file",
            ConfigSource::Default => "default",
        };
        f.write_str(s)
    }
}

/// Configuration file structure
#[derive(Debug, Deserialize)]
struct ConfigFile {
    database: Option<DatabaseSection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    url: Option<String>,
}

impl AppConfig {
    /// Load configuration with precedence: CLI > env > file > default
    pub fn load(config_path: Option<&PathBuf>, cli_database_url: Option<&str>) -> Result<Self> {
        let file_config = Self::load_from_file(config_path)?;
        let env_url = std::env::var(DATABASE_URL_ENV).ok();

        Ok(Self::resolve(cli_database_url, env_url, file_config))
    }

    fn resolve(
        cli_database_url: Option<&str>,
        env_url: Option<String>,
        file_config: Option<ConfigFile>,
    ) -> Self {
        let file_url = file_config
            .and_then(|f| f.database)
            .and_then(|d| d.url)
            .filter(|u| !u.trim().is_empty());

        let (database_url, source) = if let Some(url) = cli_database_url {
            (url.to_string(), ConfigSource::Flag)
        } else if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            (url, ConfigSource::Env)
        } else if let Some(url) = file_url {
            (url, ConfigSource::File)
        } else {
            (Self::default_database_url(), ConfigSource::Default)
        };

        Self {
            database_url,
            source,
        }
    }

    /// Parse the database URL into a storage configuration
    pub fn storage_config(&self) -> Result<StorageConfig> {
        StorageConfig::from_url(&self.database_url)
            .with_context(|| format!("invalid database URL from {}", self.source))
    }

    /// Create the directory holding a SQLite database file
    ///
    /// SQLite creates a missing file but not its parent directories.
    pub fn ensure_database_dir(storage: &StorageConfig) -> Result<()> {
        if storage.backend != BackendType::Sqlite || storage.connection_string == ":memory:" {
            return Ok(());
        }

        match Path::new(&storage.connection_string).parent() {
            Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create database directory {:?}", dir))?;
                tracing::debug!(dir = %dir.display(), "created database directory");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Database URL with any password masked, for display
    pub fn redacted_url(&self) -> String {
        match url::Url::parse(&self.database_url) {
            Ok(mut parsed) if parsed.password().is_some() => {
                if parsed.set_password(Some("****")).is_ok() {
                    parsed.to_string()
                } else {
                    self.database_url.clone()
                }
            }
            _ => self.database_url.clone(),
        }
    }

    fn load_from_file(path: Option<&PathBuf>) -> Result<Option<ConfigFile>> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => {
                let default = Self::default_config_path();
                if !default.exists() {
                    return Ok(None);
                }
                default
            }
        };

        if !config_path.exists() {
            if path.is_some() {
                // Explicitly specified path must exist
                return Err(anyhow!("Config file not found: {:?}", config_path));
            }
            return Ok(None);
        }

        Self::read_file(&config_path).map(Some)
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// SQLite file under the user's data directory
    ///
    /// Falls back to a file in the working directory when the platform
    /// has no data directory.
    fn default_database_url() -> String {
        match dirs::data_dir() {
            Some(dir) => {
                let path = dir.join("snippetbox").join(DEFAULT_DATABASE_FILE);
                format!("sqlite://{}", path.display())
            }
            None => format!("sqlite:{}", DEFAULT_DATABASE_FILE),
        }
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snippetbox")
            .join("config.toml")
    }
}
