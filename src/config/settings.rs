//! Inventory settings loading from config.toml
//!
//! The low-stock threshold and display currency live here and are threaded
//! into the aggregation functions from one place. A missing file is not an
//! error: the defaults match the original dashboard (10 units, PKR).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default low-stock threshold in units.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Default display currency.
pub const DEFAULT_CURRENCY: &str = "PKR";

/// Environment variable that overrides the settings file location.
pub const CONFIG_PATH_ENV: &str = "INVENTORY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Inventory display and aggregation settings
    #[serde(default)]
    pub inventory: InventorySettings,
}

/// `[inventory]` table of config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct InventorySettings {
    /// Products with fewer units than this count as low stock
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,
    /// Currency code shown next to money amounts
    #[serde(default = "default_currency")]
    pub currency: String,
}

const fn default_low_stock_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            currency: default_currency(),
        }
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or the threshold is not positive.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if settings.inventory.low_stock_threshold < 1 {
        return Err(Error::Config {
            message: format!(
                "low_stock_threshold must be at least 1, got {}",
                settings.inventory.low_stock_threshold
            ),
        });
    }
    Ok(settings)
}

/// Loads settings from a TOML file, using defaults when the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No settings file at {}, using defaults.", path.display());
        return Ok(Settings::default());
    }

    debug!("Loading settings from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_settings(&contents)
}

/// Loads settings from `INVENTORY_CONFIG`, or ./config.toml when unset.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    load_settings(path)
}
