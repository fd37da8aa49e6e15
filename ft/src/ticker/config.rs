//! Ticker configuration

use serde::{Deserialize, Serialize};

use super::error::TickerError;

/// Ticker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Number of ordered lanes. Lanes execute in ascending index order on
    /// every frame; two lanes give the classic read-then-write split.
    #[serde(default = "default_num_lanes")]
    pub num_lanes: usize,
}

fn default_num_lanes() -> usize {
    2
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self { num_lanes: 2 }
    }
}

impl TickerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), TickerError> {
        if self.num_lanes == 0 {
            return Err(TickerError::InvalidConfiguration(
                "num_lanes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TickerConfig::default();
        assert_eq!(config.num_lanes, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_lanes_rejected() {
        let config = TickerConfig { num_lanes: 0 };
        assert!(matches!(
            config.validate(),
            Err(TickerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: TickerConfig = serde_json::from_str("{}").expect("Failed to parse config");
        assert_eq!(config.num_lanes, 2);

        let config: TickerConfig =
            serde_json::from_str(r#"{"num_lanes": 3}"#).expect("Failed to parse config");
        assert_eq!(config.num_lanes, 3);
    }
}
