// ⚙️ Configuration - seller roster, price table, seed contacts
//
// Supplied once at startup. Loaded from a JSON file (path in
// FESTIVAL_SALES_CONFIG) or the built-in festival defaults.

use crate::error::LedgerError;
use crate::tickets::PriceTable;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

/// Env var holding the config file path
pub const CONFIG_PATH_ENV: &str = "FESTIVAL_SALES_CONFIG";

/// Contact known before any sale is recorded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedContact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Allowed seller names, in picker order
    pub sellers: Vec<String>,

    /// Unit price per ticket type (missing entries keep the default price)
    #[serde(default)]
    pub prices: PriceTable,

    /// Contacts loaded into the book at startup
    #[serde(default)]
    pub seed_contacts: Vec<SeedContact>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sellers: vec!["Ana".to_string(), "Pedro".to_string(), "Mariana".to_string()],
            prices: PriceTable::default(),
            seed_contacts: vec![
                SeedContact { name: "Ana".to_string(), phone: "(34) 98888-5555".to_string() },
                SeedContact { name: "Pedro".to_string(), phone: "(34) 99996-9999".to_string() },
                SeedContact { name: "Mariana".to_string(), phone: "(34) 99999-9444".to_string() },
            ],
        }
    }
}

impl Config {
    /// Config with the given roster, default prices and no seed contacts
    pub fn with_sellers<I, S>(sellers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Config {
            sellers: sellers.into_iter().map(Into::into).collect(),
            prices: PriceTable::default(),
            seed_contacts: Vec::new(),
        }
    }

    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = serde_json::from_str(&content)
            .context("Failed to parse config JSON")?;

        config.validate()?;
        Ok(config)
    }

    /// Config from the file named in FESTIVAL_SALES_CONFIG, else the defaults
    pub fn load() -> Result<Self> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                tracing::info!(path = %path, "loading config");
                Config::from_file(path.trim())
            }
            _ => {
                tracing::warn!("{} not set, using built-in festival config", CONFIG_PATH_ENV);
                Ok(Config::default())
            }
        }
    }

    /// Roster must hold distinct, non-blank names
    pub fn validate(&self) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();

        for seller in &self.sellers {
            if seller.trim().is_empty() {
                return Err(LedgerError::Config("seller names must not be blank".to_string()));
            }
            if !seen.insert(seller.as_str()) {
                return Err(LedgerError::Config(format!("duplicate seller: {}", seller)));
            }
        }

        if self.sellers.is_empty() {
            tracing::warn!("seller roster is empty, every sale will be rejected");
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
