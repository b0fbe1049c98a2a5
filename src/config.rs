use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const KEY_VAR: &str = "SUPABASE_SERVICE_KEY";
const CONFIG_PATH_VAR: &str = "RATINGS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
}

/// Fully resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub tables: TableConfig,
    pub store: StoreCredentials,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Table names on the store side
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub ratings: String,
    pub stats: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            ratings: "ratings".to_string(),
            stats: "recipe_stats".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct StoreCredentials {
    /// Project URL without a trailing slash
    pub url: String,
    pub service_key: String,
}

// Keeps the service key out of logs.
impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url)
            .field("service_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    tables: TableConfig,
}

impl AppConfig {
    /// Load configuration from the optional TOML file and the process environment.
    ///
    /// Fails fast when either store credential is absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let file = read_file(&path)?;
        Self::resolve(file, |name| std::env::var(name).ok())
    }

    fn resolve<F>(file: Option<String>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: FileConfig = match file {
            Some(contents) => toml::from_str(&contents)?,
            None => FileConfig::default(),
        };

        let mut server = file.server;
        if let Some(port) = env("PORT") {
            server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        let url = required(&env, URL_VAR)?;
        let service_key = required(&env, KEY_VAR)?;

        Ok(Self {
            server,
            tables: file.tables,
            store: StoreCredentials {
                url: url.trim_end_matches('/').to_string(),
                service_key,
            },
        })
    }
}

fn required<F>(env: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    env(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}

fn read_file(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}
