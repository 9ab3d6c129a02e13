//! Pricing configuration.
//!
//! The knobs the original system pulled from ambient globals are grouped
//! here and passed explicitly at construction: the upfront fee convention,
//! the default protection tenor, and the Monte Carlo setup. Loadable from
//! TOML.

use serde::Deserialize;
use thiserror::Error;

use cdx_models::schedules::Tenor;

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A field violates its admissible range.
    #[error("Invalid configuration field {field}: {reason}")]
    Invalid {
        /// Field name.
        field: &'static str,
        /// Description of the violation.
        reason: String,
    },

    /// The configuration text could not be parsed.
    #[error("Configuration parse error: {0}")]
    Parse(String),
}

/// Pricing configuration shared across contracts.
///
/// # Examples
///
/// ```
/// use cdx_pricing::config::PricingConfig;
///
/// let config = PricingConfig::from_toml_str(
///     r#"
///     fee = 0.001
///     protection_tenor = "2Y"
///     trajectories = 20
///     "#,
/// ).unwrap();
///
/// assert_eq!(config.trajectories, 20);
/// assert_eq!(config.protection_tenor.months(), 24);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Upfront fee as a fraction of notional.
    pub fee: f64,
    /// Default protection tenor applied to a contract's start date.
    pub protection_tenor: Tenor,
    /// Monte Carlo trajectory count for simulated discount curves.
    pub trajectories: usize,
    /// Simulation time step in years.
    pub t_step: f64,
    /// RNG seed for reproducible simulations.
    pub seed: u64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fee: 0.0,
            protection_tenor: Tenor::from_years(2),
            trajectories: 20,
            t_step: 1.0 / 365.0,
            seed: 0,
        }
    }
}

impl PricingConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig =
            toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fee.is_finite() || self.fee < 0.0 {
            return Err(ConfigError::Invalid {
                field: "fee",
                reason: format!("must be non-negative, got {}", self.fee),
            });
        }
        if self.trajectories == 0 {
            return Err(ConfigError::Invalid {
                field: "trajectories",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.t_step.is_finite() || self.t_step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "t_step",
                reason: format!("must be positive, got {}", self.t_step),
            });
        }
        Ok(())
    }
}
