//! Agent configuration and validation.
//!
//! Every field has a default matching the stock HAL terminal, so a config
//! file only needs the fields it changes.
//!
//! ```
//! use hal_logic::config::{AgentConfig, validate_config};
//!
//! let config = AgentConfig::from_json(r#"{ "location": "pod bay" }"#).unwrap();
//! assert_eq!(config.location, "pod bay");
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::greetings::DEFAULT_GREETINGS;
use crate::life_support::o2_constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Name shown when the agent joins.
    pub agent_name: String,
    /// Name shown when the operator starts the chat.
    pub operator_name: String,
    /// Where the agent believes it is at start.
    pub location: String,
    /// Greetings used by the rotation, in order.
    pub greetings: Vec<String>,
    /// Oxygen level at start (0–100).
    pub initial_oxygen: u32,
    /// Oxygen consumed per life-support tick.
    pub oxygen_per_tick: u32,
    /// Seconds between agent ticks.
    pub agent_tick_seconds: f64,
    /// Seconds between life-support ticks.
    pub life_support_tick_seconds: f64,
    /// Seed for template selection (None = random).
    pub seed: Option<u64>,
    /// Speak the next rotating greeting before every conversational reply.
    pub greet_before_reply: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_name: "HAL9000".to_string(),
            operator_name: "Operator".to_string(),
            location: "unknown".to_string(),
            greetings: DEFAULT_GREETINGS.iter().map(|g| g.to_string()).collect(),
            initial_oxygen: o2_constants::INITIAL_LEVEL,
            oxygen_per_tick: o2_constants::CONSUMPTION_PER_TICK,
            agent_tick_seconds: 1.0,
            life_support_tick_seconds: 10.0,
            seed: None,
            greet_before_reply: false,
        }
    }
}

impl AgentConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Agent name blank.
    EmptyAgentName,
    /// Greeting rotation needs at least one line.
    NoGreetings,
    /// Oxygen above full tanks.
    OxygenOutOfRange(u32),
    /// Agent tick interval below one millisecond (or not finite).
    InvalidAgentTick(f64),
    /// Life-support tick interval below one millisecond (or not finite).
    InvalidLifeSupportTick(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyAgentName => write!(f, "agent name is empty"),
            ConfigError::NoGreetings => write!(f, "at least one greeting is required"),
            ConfigError::OxygenOutOfRange(v) => {
                write!(f, "initial oxygen {} is above {}", v, o2_constants::MAX_LEVEL)
            }
            ConfigError::InvalidAgentTick(v) => {
                write!(f, "agent tick interval {} is below {}s", v, MIN_TICK_SECONDS)
            }
            ConfigError::InvalidLifeSupportTick(v) => {
                write!(f, "life-support tick interval {} is below {}s", v, MIN_TICK_SECONDS)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Shortest tick interval accepted, in seconds.
pub const MIN_TICK_SECONDS: f64 = 0.001;

fn valid_interval(seconds: f64) -> bool {
    seconds.is_finite() && seconds >= MIN_TICK_SECONDS
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &AgentConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.agent_name.trim().is_empty() {
        errors.push(ConfigError::EmptyAgentName);
    }
    if config.greetings.is_empty() {
        errors.push(ConfigError::NoGreetings);
    }
    if config.initial_oxygen > o2_constants::MAX_LEVEL {
        errors.push(ConfigError::OxygenOutOfRange(config.initial_oxygen));
    }
    if !valid_interval(config.agent_tick_seconds) {
        errors.push(ConfigError::InvalidAgentTick(config.agent_tick_seconds));
    }
    if !valid_interval(config.life_support_tick_seconds) {
        errors.push(ConfigError::InvalidLifeSupportTick(
            config.life_support_tick_seconds,
        ));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AgentConfig::default()).is_empty());
    }

    #[test]
    fn test_defaults() {
        let c = AgentConfig::default();
        assert_eq!(c.location, "unknown");
        assert_eq!(c.greetings.len(), 3);
        assert_eq!(c.initial_oxygen, 91);
        assert!(c.life_support_tick_seconds > c.agent_tick_seconds);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = AgentConfig::from_json(r#"{ "initial_oxygen": 50, "seed": 3 }"#).unwrap();
        assert_eq!(c.initial_oxygen, 50);
        assert_eq!(c.seed, Some(3));
        assert_eq!(c.agent_name, "HAL9000");
    }

    #[test]
    fn test_collects_every_error() {
        let c = AgentConfig {
            agent_name: "  ".into(),
            greetings: Vec::new(),
            initial_oxygen: 101,
            agent_tick_seconds: 0.0,
            life_support_tick_seconds: f64::NAN,
            ..Default::default()
        };
        let errors = validate_config(&c);
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ConfigError::EmptyAgentName));
        assert!(errors.contains(&ConfigError::NoGreetings));
        assert!(errors.contains(&ConfigError::OxygenOutOfRange(101)));
        assert!(errors.contains(&ConfigError::InvalidAgentTick(0.0)));
    }

    #[test]
    fn test_tiny_intervals_rejected() {
        let c = AgentConfig {
            agent_tick_seconds: 1e-17,
            life_support_tick_seconds: 0.0005,
            ..Default::default()
        };
        assert_eq!(
            validate_config(&c),
            vec![
                ConfigError::InvalidAgentTick(1e-17),
                ConfigError::InvalidLifeSupportTick(0.0005),
            ]
        );

        let c = AgentConfig {
            agent_tick_seconds: MIN_TICK_SECONDS,
            ..Default::default()
        };
        assert!(validate_config(&c).is_empty());
    }

    #[test]
    fn test_bad_json_rejected() {
        assert!(AgentConfig::from_json(r#"{ "initial_oxygen": -1 }"#).is_err());
    }
}
