//! Match and arbiter configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Rounds played when nobody reaches the threshold
pub const MAX_ROUNDS: u8 = 7;
/// Points that end the match immediately
pub const WIN_THRESHOLD: u8 = 4;
/// Pause between two scans of the choice buttons
pub const SAMPLE_INTERVAL_MS: u64 = 200;
/// Time the player has to press a button
pub const INPUT_DEADLINE_MS: u64 = 3000;
/// Analog level above which a button counts as pressed
pub const ACTIVATION_THRESHOLD: f32 = 0.5;

/// Errors found while loading or validating a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max_rounds must be at least 1")]
    NoRounds,

    #[error("win_threshold must be between 1 and max_rounds ({max_rounds}), got {threshold}")]
    UnreachableThreshold { threshold: u8, max_rounds: u8 },

    #[error("sample_interval_ms must be greater than zero")]
    ZeroSampleInterval,

    #[error("deadline_ms ({deadline_ms}) is shorter than one sample interval ({sample_interval_ms})")]
    DeadlineTooShort { deadline_ms: u64, sample_interval_ms: u64 },

    #[error("activation_threshold must be in (0, 1], got {0}")]
    InvalidActivationThreshold(f32),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Timing of the input arbiter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    pub sample_interval_ms: u64,
    pub deadline_ms: u64,
    pub activation_threshold: f32,
}

impl ArbiterConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        if self.deadline_ms < self.sample_interval_ms {
            return Err(ConfigError::DeadlineTooShort {
                deadline_ms: self.deadline_ms,
                sample_interval_ms: self.sample_interval_ms,
            });
        }
        // NaN fails both comparisons
        if !(self.activation_threshold > 0.0 && self.activation_threshold <= 1.0) {
            return Err(ConfigError::InvalidActivationThreshold(self.activation_threshold));
        }
        Ok(())
    }
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            deadline_ms: INPUT_DEADLINE_MS,
            activation_threshold: ACTIVATION_THRESHOLD,
        }
    }
}

/// Shape of a match: round cap, threshold and input timing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub max_rounds: u8,
    pub win_threshold: u8,
    pub arbiter: ArbiterConfig,
}

impl MatchConfig {
    /// Seven rounds, first to four
    pub fn standard() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            win_threshold: WIN_THRESHOLD,
            arbiter: ArbiterConfig::default(),
        }
    }

    /// Three rounds, first to two
    pub fn quick() -> Self {
        Self {
            max_rounds: 3,
            win_threshold: 2,
            arbiter: ArbiterConfig::default(),
        }
    }

    /// Parse a JSON document; missing fields take the standard values
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.win_threshold == 0 || self.win_threshold > self.max_rounds {
            return Err(ConfigError::UnreachableThreshold {
                threshold: self.win_threshold,
                max_rounds: self.max_rounds,
            });
        }
        self.arbiter.validate()
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_values() {
        let config = MatchConfig::standard();
        assert_eq!(config.max_rounds, 7);
        assert_eq!(config.win_threshold, 4);
        assert_eq!(config.arbiter.sample_interval(), Duration::from_millis(200));
        assert_eq!(config.arbiter.deadline(), Duration::from_secs(3));
        assert!(config.validate().is_ok());
        assert!(MatchConfig::quick().validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = MatchConfig::from_json(r#"{"win_threshold": 3, "arbiter": {"deadline_ms": 1000}}"#)
            .unwrap();
        assert_eq!(config.max_rounds, 7);
        assert_eq!(config.win_threshold, 3);
        assert_eq!(config.arbiter.deadline_ms, 1000);
        assert_eq!(config.arbiter.sample_interval_ms, 200);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(MatchConfig::from_json("{not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MatchConfig::standard();
        config.max_rounds = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoRounds)));

        let mut config = MatchConfig::standard();
        config.win_threshold = 8;
        assert!(matches!(config.validate(), Err(ConfigError::UnreachableThreshold { .. })));

        let mut config = MatchConfig::standard();
        config.win_threshold = 0;
        assert!(matches!(config.validate(), Err(ConfigError::UnreachableThreshold { .. })));

        let mut config = MatchConfig::standard();
        config.arbiter.sample_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ZeroSampleInterval)));

        let mut config = MatchConfig::standard();
        config.arbiter.deadline_ms = 100;
        assert!(matches!(config.validate(), Err(ConfigError::DeadlineTooShort { .. })));

        let mut config = MatchConfig::standard();
        config.arbiter.activation_threshold = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidActivationThreshold(_))));

        config.arbiter.activation_threshold = f32::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidActivationThreshold(_))));
    }
}
