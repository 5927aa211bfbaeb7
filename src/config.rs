// ⚙️ Ledger Configuration - TOML file + environment override

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `database`
pub const DATABASE_ENV: &str = "LEDGER_DB";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// SQLite database file
    pub database: PathBuf,

    /// How long a write waits on a locked database before failing
    pub busy_timeout_ms: u64,

    /// Default tracing filter when RUST_LOG is unset
    pub log_level: String,

    pub seed: SeedConfig,
}

/// Knobs for the mock transaction generator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Fixed RNG seed for reproducible runs
    pub rng_seed: Option<u64>,
    pub min_transactions: usize,
    pub max_transactions: usize,
    pub min_amount: i64,
    pub max_amount: i64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            database: PathBuf::from("ledger.db"),
            busy_timeout_ms: 5000,
            log_level: "info".to_string(),
            seed: SeedConfig::default(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        SeedConfig {
            rng_seed: None,
            min_transactions: 2,
            max_transactions: 3,
            min_amount: 50,
            max_amount: 300,
        }
    }
}

impl LedgerConfig {
    /// Load from an optional TOML file, then apply `LEDGER_DB`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => LedgerConfig::default(),
        };

        if let Ok(database) = std::env::var(DATABASE_ENV) {
            if !database.is_empty() {
                config.database = PathBuf::from(database);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: LedgerConfig = toml::from_str(raw).context("Failed to parse TOML")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.as_os_str().is_empty() {
            bail!("database path must not be empty");
        }
        self.seed.validate()
    }
}

impl SeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_transactions > self.max_transactions {
            bail!(
                "seed.min_transactions ({}) exceeds seed.max_transactions ({})",
                self.min_transactions,
                self.max_transactions
            );
        }
        if self.min_amount <= 0 {
            bail!("seed.min_amount must be positive");
        }
        if self.min_amount > self.max_amount {
            bail!(
                "seed.min_amount ({}) exceeds seed.max_amount ({})",
                self.min_amount,
                self.max_amount
            );
        }
        Ok(())
    }
}
