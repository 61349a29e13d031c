//! # Quote Configuration
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`AGRIMART_*`, nested keys with `__`,
//!    e.g. `AGRIMART_RATES__PER_KM=1500`)
//! 2. Config file (`agrimart.toml`, or the path given with `--config`)
//! 3. Defaults (this file)
//!
//! Keys are snake_case at this layer because environment variable names are
//! case-insensitive; [`RatesConfig`] is folded into a core
//! [`RateCard`] after loading.

use std::path::Path;

use agrimart_core::{Money, Rate, RateCard};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "agrimart.toml";

/// Quote CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteConfig {
    /// Currency symbol used in text output.
    pub currency_symbol: String,

    /// Decimal places of the currency's minor unit.
    pub currency_decimals: u8,

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Freight rate overrides.
    pub rates: RatesConfig,
}

/// Optional overrides of the default [`RateCard`].
///
/// Amounts are in minor units, multipliers and the insurance rate in basis
/// points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub base_fee: Option<i64>,
    pub per_km: Option<i64>,
    pub per_kg: Option<i64>,
    pub bike: Option<u32>,
    pub pickup: Option<u32>,
    pub truck: Option<u32>,
    pub reefer: Option<u32>,
    pub express: Option<u32>,
    pub same_day: Option<u32>,
    pub insurance_bps: Option<u32>,
}

impl Default for QuoteConfig {
    /// Rupee display, info-level logging, default freight rates.
    fn default() -> Self {
        QuoteConfig {
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            log_filter: "info".to_string(),
            rates: RatesConfig::default(),
        }
    }
}

impl QuoteConfig {
    /// Loads configuration from defaults, an optional file and the
    /// environment.
    ///
    /// An explicitly given `path` must exist; the default
    /// `agrimart.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("AGRIMART")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: QuoteConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_decimals > 4 {
            return Err(ConfigError::InvalidValue("currency_decimals".to_string()));
        }

        let negative_amount = [
            ("rates.base_fee", self.rates.base_fee),
            ("rates.per_km", self.rates.per_km),
            ("rates.per_kg", self.rates.per_kg),
        ]
        .into_iter()
        .find(|(_, v)| v.is_some_and(|v| v < 0));

        if let Some((key, _)) = negative_amount {
            return Err(ConfigError::InvalidValue(key.to_string()));
        }

        Ok(())
    }

    /// Builds the freight rate card: defaults with configured overrides.
    pub fn rate_card(&self) -> RateCard {
        let mut card = RateCard::default();
        let r = &self.rates;

        if let Some(v) = r.base_fee {
            card.base_fee = Money::from_minor(v);
        }
        if let Some(v) = r.per_km {
            card.per_km = Money::from_minor(v);
        }
        if let Some(v) = r.per_kg {
            card.per_kg = Money::from_minor(v);
        }
        if let Some(v) = r.bike {
            card.vehicles.bike = Rate::from_bps(v);
        }
        if let Some(v) = r.pickup {
            card.vehicles.pickup = Rate::from_bps(v);
        }
        if let Some(v) = r.truck {
            card.vehicles.truck = Rate::from_bps(v);
        }
        if let Some(v) = r.reefer {
            card.vehicles.reefer = Rate::from_bps(v);
        }
        if let Some(v) = r.express {
            card.urgency.express = Rate::from_bps(v);
        }
        if let Some(v) = r.same_day {
            card.urgency.same_day = Rate::from_bps(v);
        }
        if let Some(v) = r.insurance_bps {
            card.insurance_rate = Rate::from_bps(v);
        }

        card
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// ```rust
    /// use agrimart_core::Money;
    /// use agrimart_quote::config::QuoteConfig;
    ///
    /// let config = QuoteConfig::default();
    /// assert_eq!(config.format_money(Money::from_minor(123_456)), "₹1234.56");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        let minor = amount.minor();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = minor / divisor;
        let frac = (minor % divisor).abs();

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_positive() {
        let config = QuoteConfig::default();
        assert_eq!(config.format_money(Money::from_minor(1234)), "₹12.34");
        assert_eq!(config.format_money(Money::from_minor(1)), "₹0.01");
        assert_eq!(config.format_money(Money::zero()), "₹0.00");
    }

    #[test]
    fn test_format_money_negative() {
        let config = QuoteConfig::default();
        assert_eq!(config.format_money(Money::from_minor(-1234)), "-₹12.34");
    }

    #[test]
    fn test_format_money_other_currency() {
        let config = QuoteConfig {
            currency_symbol: "KSh ".to_string(),
            currency_decimals: 0,
            ..QuoteConfig::default()
        };
        assert_eq!(config.format_money(Money::from_minor(1500)), "KSh 1500");
    }

    #[test]
    fn test_rate_card_overrides() {
        let config = QuoteConfig {
            rates: RatesConfig {
                per_km: Some(1_500),
                reefer: Some(25_000),
                ..RatesConfig::default()
            },
            ..QuoteConfig::default()
        };
        let card = config.rate_card();
        assert_eq!(card.per_km.minor(), 1_500);
        assert_eq!(card.vehicles.reefer.bps(), 25_000);
        assert_eq!(card.base_fee, RateCard::default().base_fee);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = QuoteConfig {
            currency_decimals: 9,
            ..QuoteConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let config = QuoteConfig {
            rates: RatesConfig {
                per_kg: Some(-5),
                ..RatesConfig::default()
            },
            ..QuoteConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(key)) if key == "rates.per_kg"
        ));
    }
}
