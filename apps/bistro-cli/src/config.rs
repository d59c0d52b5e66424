//! CLI configuration module.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BISTRO_*`)
//! 2. Config file (`--config <path>`, or `bistro.toml` in the working directory)
//! 3. Defaults (this file)
//!
//! ```toml
//! # bistro.toml
//! currency_symbol = "RM "
//! service_tax_rate = "6"
//! log_filter = "warn"
//! ```

use std::path::Path;

use bistro_core::validation::validate_tax_rate;
use bistro_core::TaxRate;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default `tracing` filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,bistro=debug";

/// Host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Prefix printed before amounts on receipts
    pub currency_symbol: String,

    /// Service tax in percent for `order` when `--service-tax-rate` is absent
    pub service_tax_rate: Decimal,

    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl CliConfig {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// An explicit `path` must exist; the implicit `bistro.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("bistro").required(false),
        };

        let builder = Self::defaults()?
            .add_source(file)
            .add_source(Environment::with_prefix("BISTRO"));

        Self::build(builder)
    }

    /// Service tax rate as a `TaxRate`.
    pub fn service_tax(&self) -> TaxRate {
        TaxRate::from_percent(self.service_tax_rate)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Ok(config::Config::builder()
            .set_default("currency_symbol", "$")?
            .set_default("service_tax_rate", "10")?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: CliConfig = builder.build()?.try_deserialize()?;

        validate_tax_rate("service_tax_rate", config.service_tax()).map_err(|e| {
            ConfigError::InvalidValue {
                key: "service_tax_rate".to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use rust_decimal_macros::dec;

    fn from_toml(toml: &str) -> Result<CliConfig, ConfigError> {
        let builder = CliConfig::defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        CliConfig::build(builder)
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("").unwrap();
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.service_tax_rate, dec!(10));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let config = from_toml(
            r#"
            currency_symbol = "RM "
            service_tax_rate = "6.5"
            "#,
        )
        .unwrap();
        assert_eq!(config.currency_symbol, "RM ");
        assert_eq!(config.service_tax(), TaxRate::from_percent(dec!(6.5)));
    }

    #[test]
    fn test_negative_service_tax_is_rejected() {
        let err = from_toml(r#"service_tax_rate = "-1""#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "service_tax_rate"
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/bistro.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
