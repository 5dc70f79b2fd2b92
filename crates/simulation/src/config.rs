//! Engine configuration.

use std::collections::HashMap;
use thiserror::Error;

/// Default negative tolerance for a single withdrawal, in token1 units.
pub const DEFAULT_LOSS_TOLERANCE: i128 = 2;
/// Default block time in seconds.
pub const DEFAULT_BLOCK_TIME_SECONDS: u64 = 12;
/// Default token decimals used to scale raw amounts in summaries.
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A value could not be parsed or is out of range.
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Configuration for a loss pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossConfig {
    /// Largest gain a single withdrawal may show before it is treated as a defect.
    pub loss_tolerance: i128,
    /// Seconds per block, for annualizing.
    pub block_time_seconds: u64,
    /// Decimals of both pool tokens.
    pub token_decimals: u32,
}

impl Default for LossConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LossConfig {
    /// Creates a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loss_tolerance: DEFAULT_LOSS_TOLERANCE,
            block_time_seconds: DEFAULT_BLOCK_TIME_SECONDS,
            token_decimals: DEFAULT_TOKEN_DECIMALS,
        }
    }

    /// Sets the withdrawal tolerance.
    #[must_use]
    pub fn with_loss_tolerance(mut self, tolerance: i128) -> Self {
        self.loss_tolerance = tolerance;
        self
    }

    /// Sets the block time.
    #[must_use]
    pub fn with_block_time(mut self, seconds: u64) -> Self {
        self.block_time_seconds = seconds;
        self
    }

    /// Sets the token decimals.
    #[must_use]
    pub fn with_token_decimals(mut self, decimals: u32) -> Self {
        self.token_decimals = decimals;
        self
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(&std::env::vars().collect())
    }

    /// Reads `LOSS_TOLERANCE`, `BLOCK_TIME_SECONDS` and `TOKEN_DECIMALS`, falling back to defaults.
    pub fn from_env_map(env_map: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Some(raw) = env_map.get("LOSS_TOLERANCE") {
            config.loss_tolerance = raw
                .trim()
                .parse::<i128>()
                .ok()
                .filter(|t| *t >= 0)
                .ok_or_else(|| invalid("LOSS_TOLERANCE", "must be a non-negative integer"))?;
        }

        if let Some(raw) = env_map.get("BLOCK_TIME_SECONDS") {
            config.block_time_seconds = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| invalid("BLOCK_TIME_SECONDS", "must be a positive integer"))?;
        }

        if let Some(raw) = env_map.get("TOKEN_DECIMALS") {
            config.token_decimals = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|d| *d <= 38)
                .ok_or_else(|| invalid("TOKEN_DECIMALS", "must be an integer between 0 and 38"))?;
        }

        Ok(config)
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue(key.to_string(), reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = LossConfig::from_env_map(&HashMap::new()).unwrap();
        assert_eq!(config, LossConfig::default());
        assert_eq!(config.loss_tolerance, 2);
        assert_eq!(config.block_time_seconds, 12);
        assert_eq!(config.token_decimals, 18);
    }

    #[test]
    fn test_overrides() {
        let mut env_map = HashMap::new();
        env_map.insert("LOSS_TOLERANCE".to_string(), "5".to_string());
        env_map.insert("BLOCK_TIME_SECONDS".to_string(), "15".to_string());
        env_map.insert("TOKEN_DECIMALS".to_string(), "6".to_string());

        let config = LossConfig::from_env_map(&env_map).unwrap();
        assert_eq!(
            config,
            LossConfig::new()
                .with_loss_tolerance(5)
                .with_block_time(15)
                .with_token_decimals(6)
        );
    }

    #[test]
    fn test_invalid_tolerance() {
        let mut env_map = HashMap::new();
        env_map.insert("LOSS_TOLERANCE".to_string(), "-1".to_string());
        match LossConfig::from_env_map(&env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "LOSS_TOLERANCE"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_block_time() {
        let mut env_map = HashMap::new();
        env_map.insert("BLOCK_TIME_SECONDS".to_string(), "0".to_string());
        match LossConfig::from_env_map(&env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "BLOCK_TIME_SECONDS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_decimals() {
        let mut env_map = HashMap::new();
        env_map.insert("TOKEN_DECIMALS".to_string(), "eighteen".to_string());
        match LossConfig::from_env_map(&env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "TOKEN_DECIMALS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
