//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FENESTRA_DATA_DIR` - directory for the file-backed store; absent
//!   means an in-memory store
//! - `FENESTRA_PAYMENT_SUCCESS_RATE` - simulated approval probability,
//!   `0.0..=1.0` (default: 0.9)
//! - `FENESTRA_PAYMENT_LATENCY_MS` - simulated gateway latency in
//!   milliseconds (default: 400)
//! - `FENESTRA_TAX_RATE` - tax applied to order subtotals (default: 0.18)

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::checkout::SimulatedGateway;
use crate::storage::{JsonFileStore, KvStore, MemoryStore, StorageError};

const DEFAULT_SUCCESS_RATE: f64 = 0.9;
const DEFAULT_LATENCY_MS: u64 = 400;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed store; `None` means in-memory.
    pub data_dir: Option<PathBuf>,
    /// Simulated payment gateway settings.
    pub payment: PaymentConfig,
    /// Tax rate applied to order subtotals.
    pub tax_rate: Decimal,
}

/// Simulated payment gateway settings.
#[derive(Debug, Clone, Copy)]
pub struct PaymentConfig {
    /// Approval probability, `0.0..=1.0`.
    pub success_rate: f64,
    /// Simulated processing latency.
    pub latency: Duration,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            success_rate: DEFAULT_SUCCESS_RATE,
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            payment: PaymentConfig::default(),
            tax_rate: Decimal::new(18, 2),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a variable is present but does not
    /// parse, or parses to an out-of-range value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    /// `from_env` is this over `std::env::var`; tests pass a map.
    ///
    /// # Errors
    ///
    /// Same contract as [`StorefrontConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("FENESTRA_DATA_DIR").map(PathBuf::from);

        let success_rate = match lookup("FENESTRA_PAYMENT_SUCCESS_RATE") {
            None => DEFAULT_SUCCESS_RATE,
            Some(raw) => {
                let rate: f64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar("FENESTRA_PAYMENT_SUCCESS_RATE", raw.clone())
                })?;
                if !(0.0..=1.0).contains(&rate) {
                    return Err(ConfigError::InvalidEnvVar(
                        "FENESTRA_PAYMENT_SUCCESS_RATE",
                        format!("{raw} (must be within 0.0..=1.0)"),
                    ));
                }
                rate
            }
        };

        let latency_ms = match lookup("FENESTRA_PAYMENT_LATENCY_MS") {
            None => DEFAULT_LATENCY_MS,
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("FENESTRA_PAYMENT_LATENCY_MS", raw.clone())
            })?,
        };

        let tax_rate = match lookup("FENESTRA_TAX_RATE") {
            None => Decimal::new(18, 2),
            Some(raw) => {
                let rate: Decimal = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnvVar("FENESTRA_TAX_RATE", raw.clone()))?;
                if rate.is_sign_negative() {
                    return Err(ConfigError::InvalidEnvVar(
                        "FENESTRA_TAX_RATE",
                        format!("{raw} (must not be negative)"),
                    ));
                }
                rate
            }
        };

        Ok(Self {
            data_dir,
            payment: PaymentConfig {
                success_rate,
                latency: Duration::from_millis(latency_ms),
            },
            tax_rate,
        })
    }

    /// Open the store this configuration describes: file-backed when a
    /// data directory is set, in-memory otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the data directory cannot be created.
    pub fn open_store(&self) -> Result<Arc<dyn KvStore>, StorageError> {
        Ok(match &self.data_dir {
            Some(dir) => Arc::new(JsonFileStore::open(dir.clone())?),
            None => Arc::new(MemoryStore::new()),
        })
    }

    /// Build the simulated gateway this configuration describes.
    #[must_use]
    pub fn gateway(&self) -> SimulatedGateway {
        SimulatedGateway::new(self.payment.success_rate, self.payment.latency)
    }
}
