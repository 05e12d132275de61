//! Configuration loading for the SPBU console.
//!
//! `spbu.toml` carries display settings and seed data, `DATABASE_URL` selects
//! the ledger database and `SPBU_ACCOUNT` the connected wallet.

/// Ledger database connection and table creation
pub mod database;

/// Seed data sections of `spbu.toml`
pub mod seed;

/// Connected-account session
pub mod session;

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "SPBU_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "spbu.toml";

/// Configuration structure representing the entire `spbu.toml` file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// List rendering settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Records used to populate an empty ledger
    #[serde(flatten)]
    pub seed: seed::SeedData,
}

/// Page sizing for list views
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DisplayConfig {
    /// Rows per page on paged lists
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Upper bound on reference collections fetched for lookups
    #[serde(default = "default_reference_window")]
    pub reference_window: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            reference_window: default_reference_window(),
        }
    }
}

const fn default_page_size() -> u64 {
    10
}

const fn default_reference_window() -> u64 {
    100
}

/// Parses configuration from a TOML string and validates it.
///
/// # Errors
/// Returns an error if the TOML is malformed or a display setting is zero.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;

    if config.display.page_size == 0 {
        return Err(Error::Config {
            message: "display.page_size must be greater than zero".to_string(),
        });
    }
    if config.display.reference_window == 0 {
        return Err(Error::Config {
            message: "display.reference_window must be greater than zero".to_string(),
        });
    }

    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A display setting is out of range
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;
    parse_config(&contents)
}

/// Loads configuration from `SPBU_CONFIG` or `./spbu.toml`.
///
/// A missing file is not fatal: defaults are used and nothing is seeded.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    if !Path::new(&path).exists() {
        warn!("Config file {} not found, using defaults", path);
        return Ok(AppConfig::default());
    }

    let config = load_config(&path)?;
    info!(
        spbu = config.seed.spbu.len(),
        produk = config.seed.produk.len(),
        members = config.seed.member.len(),
        page_size = config.display.page_size,
        "Loaded configuration from {}",
        path
    );
    Ok(config)
}
