//! # Server Configuration
//!
//! Settings are layered with the `config` crate: defaults, then
//! `music_school.yaml` in the working directory (or the file named by
//! `MUSIC_SCHOOL_CONFIG`), then `MUSIC_SCHOOL_*` environment variables. Every
//! key is optional.
//!
//! ```yaml
//! bind_address: "127.0.0.1:3000"   # MUSIC_SCHOOL_BIND_ADDRESS
//! data_directory: "./data"         # MUSIC_SCHOOL_DATA_DIRECTORY
//! mode: production                 # MUSIC_SCHOOL_MODE (or "test")
//! cors_origin: "http://localhost:8080"  # MUSIC_SCHOOL_CORS_ORIGIN
//! report_cache: true               # MUSIC_SCHOOL_REPORT_CACHE
//! ```

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use shared::StoreMode;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "music_school.yaml";
pub const CONFIG_PATH_VAR: &str = "MUSIC_SCHOOL_CONFIG";
pub const ENV_PREFIX: &str = "MUSIC_SCHOOL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub data_directory: PathBuf,
    pub mode: StoreMode,
    pub cors_origin: String,
    /// Memoize the last payroll aggregate until the store changes
    pub report_cache: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_directory: PathBuf::from("./data"),
            mode: StoreMode::Production,
            cors_origin: "http://localhost:8080".to_string(),
            report_cache: true,
        }
    }
}

impl ServerConfig {
    /// Load from the config file and the process environment
    pub fn load() -> Result<Self> {
        let explicit_path = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::load_from(explicit_path, None)
    }

    /// Load from `explicit_path` (required when given) or the default file
    /// (optional). `env` replaces the process environment when set.
    pub fn load_from(explicit_path: Option<PathBuf>, env: Option<Map<String, String>>) -> Result<Self> {
        let required = explicit_path.is_some();
        let path = explicit_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let settings = Config::builder()
            .add_source(File::from(path.as_path()).format(FileFormat::Yaml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to read configuration (file {:?})", path))?;

        let config: ServerConfig = settings
            .try_deserialize()
            .context("Invalid server configuration")?;
        info!("Loaded server config (file {:?}, required: {})", path, required);
        Ok(config)
    }
}
