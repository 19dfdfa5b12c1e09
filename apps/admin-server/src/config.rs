//! # Server Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WORKSHOP_PORT=9000                                                 │
//! │     WORKSHOP_LOW_STOCK_THRESHOLD=3                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $WORKSHOP_CONFIG, or                                               │
//! │     ~/.config/vidya-workshop/server.toml (Linux)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! currency_symbol = "₹"
//!
//! [http]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [store]
//! name = "VIDYA WORK SHOP"
//! phone = "+91 12345 67890"
//! opening_hours = ["Sun - Fri: 9:00 AM - 8:00 PM"]
//!
//! [inventory]
//! low_stock_threshold = 5
//! parts_per_page = 10
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use workshop_core::document::StoreHeader;
use workshop_core::{Money, LOW_STOCK_THRESHOLD, PARTS_PER_PAGE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub bind_addr: String,
    pub port: u16,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl HttpSettings {
    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Public contact details, shown on the site and printed on documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreInfo {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub whatsapp_url: String,
    pub email: String,
    pub address: String,
    pub opening_hours: Vec<String>,
}

impl Default for StoreInfo {
    fn default() -> Self {
        StoreInfo {
            name: "VIDYA WORK SHOP".to_string(),
            tagline: "The premier destination for Bullet bike enthusiasts.".to_string(),
            phone: "+91 12345 67890".to_string(),
            whatsapp_url: "https://wa.me/911234567890".to_string(),
            email: "contact@vidyaworkshop.com".to_string(),
            address: "near HOTEL MINI TAJ, Sitamarhi, Bihar 843302, India".to_string(),
            opening_hours: vec!["Sun - Fri: 9:00 AM - 8:00 PM".to_string()],
        }
    }
}

impl StoreInfo {
    /// Letterhead for printed invoices and purchase orders.
    pub fn header(&self) -> StoreHeader {
        StoreHeader {
            name: self.name.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// Parts with stock strictly below this are "low stock".
    pub low_stock_threshold: i64,
    pub parts_per_page: usize,
}

impl Default for InventorySettings {
    fn default() -> Self {
        InventorySettings {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
            parts_per_page: PARTS_PER_PAGE,
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http: HttpSettings,
    pub store: StoreInfo,
    pub inventory: InventorySettings,
    pub currency_symbol: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            http: HttpSettings::default(),
            store: StoreInfo::default(),
            inventory: InventorySettings::default(),
            currency_symbol: "₹".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else `$WORKSHOP_CONFIG`, else the
    ///    platform config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var("WORKSHOP_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading server config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Applies `WORKSHOP_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("WORKSHOP_BIND_ADDR") {
            self.http.bind_addr = addr;
        }

        if let Some(port) = lookup("WORKSHOP_PORT") {
            match port.parse::<u16>() {
                Ok(p) => {
                    debug!(port = p, "Overriding port from environment");
                    self.http.port = p;
                }
                Err(_) => warn!(value = %port, "Ignoring invalid WORKSHOP_PORT"),
            }
        }

        if let Some(name) = lookup("WORKSHOP_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(phone) = lookup("WORKSHOP_STORE_PHONE") {
            self.store.phone = phone;
        }

        if let Some(threshold) = lookup("WORKSHOP_LOW_STOCK_THRESHOLD") {
            match threshold.parse::<i64>() {
                Ok(t) => self.inventory.low_stock_threshold = t,
                Err(_) => warn!(value = %threshold, "Ignoring invalid WORKSHOP_LOW_STOCK_THRESHOLD"),
            }
        }

        if let Some(symbol) = lookup("WORKSHOP_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name cannot be empty".into()));
        }
        if self.inventory.low_stock_threshold < 0 {
            return Err(ConfigError::Invalid("inventory.low_stock_threshold cannot be negative".into()));
        }
        if self.inventory.parts_per_page == 0 {
            return Err(ConfigError::Invalid("inventory.parts_per_page must be greater than 0".into()));
        }
        Ok(())
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vidya", "workshop").map(|dirs| dirs.config_dir().join("server.toml"))
    }

    /// Formats an amount with the configured currency symbol, e.g. `₹1150.00`.
    pub fn format_currency(&self, amount: Money) -> String {
        let paise = amount.paise();
        let sign = if paise < 0 { "-" } else { "" };
        let abs = paise.unsigned_abs();
        format!("{}{}{}.{:02}", sign, self.currency_symbol, abs / 100, abs % 100)
    }
}
