//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// User settings for one training session.
///
/// Immutable for the lifetime of a session; changing any field means
/// applying a new configuration, which discards the running session.
/// Missing JSON fields fall back to [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    /// Length of each round. Must be at least 1.
    pub round_duration_secs: u32,

    /// Length of each break between rounds. 0 means the next round starts
    /// on the tick after the previous one ends.
    pub break_duration_secs: u32,

    /// Number of rounds in the session. Must be at least 1.
    pub total_rounds: u32,

    /// Play the warning bell ten seconds before each round ends.
    pub warning_bell_enabled: bool,

    /// Countdown before the first round (and after a skipped break).
    pub initial_delay_secs: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            round_duration_secs: 180,
            break_duration_secs: 60,
            total_rounds: 3,
            warning_bell_enabled: true,
            initial_delay_secs: 10,
        }
    }
}

impl Configuration {
    /// Checks every field is in range.
    ///
    /// Negative values are unrepresentable, so only the two fields with a
    /// lower bound of 1 need checking.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_duration_secs == 0 {
            return Err(ConfigError::InvalidConfiguration {
                field: "round_duration_secs",
                reason: "must be at least 1".into(),
            });
        }
        if self.total_rounds == 0 {
            return Err(ConfigError::InvalidConfiguration {
                field: "total_rounds",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
