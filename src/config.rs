//! Assistant configuration

use crate::state_machine::DEFAULT_REPLY_DELAY;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_COMMAND_CAPACITY: usize = 32;
const DEFAULT_EVENT_CAPACITY: usize = 128;

/// Largest accepted bound for either session channel
pub const MAX_CHANNEL_CAPACITY: usize = 65_536;

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
    #[error("{var} must be at most {max}, got {value}")]
    TooLarge {
        var: &'static str,
        value: u64,
        max: usize,
    },
}

/// Runtime configuration for a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    /// Delay between a submission and the bot's reply
    pub reply_delay: Duration,
    /// Bound of the command channel into a session
    pub command_capacity: usize,
    /// Bound of the notification channel out of a session
    pub event_capacity: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            command_capacity: DEFAULT_COMMAND_CAPACITY,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl AssistantConfig {
    /// Read `ASSISTANT_*` variables, falling back to defaults when unset.
    ///
    /// # Errors
    ///
    /// A variable that is set but is not a number, or a channel capacity that
    /// is zero or above [`MAX_CHANNEL_CAPACITY`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`AssistantConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`AssistantConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let reply_delay = parse_var(&lookup, "ASSISTANT_REPLY_DELAY_MS")?
            .map_or(defaults.reply_delay, Duration::from_millis);

        let command_capacity = parse_var(&lookup, "ASSISTANT_COMMAND_CAPACITY")?
            .map_or(Ok(defaults.command_capacity), |n| {
                capacity("ASSISTANT_COMMAND_CAPACITY", n)
            })?;

        let event_capacity = parse_var(&lookup, "ASSISTANT_EVENT_CAPACITY")?
            .map_or(Ok(defaults.event_capacity), |n| {
                capacity("ASSISTANT_EVENT_CAPACITY", n)
            })?;

        Ok(Self {
            reply_delay,
            command_capacity,
            event_capacity,
        })
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { var, value }),
    }
}

// tokio channels panic on a zero bound and on bounds near usize::MAX
fn capacity(var: &'static str, n: u64) -> Result<usize, ConfigError> {
    match usize::try_from(n) {
        Ok(0) => Err(ConfigError::Zero { var }),
        Ok(bound) if bound <= MAX_CHANNEL_CAPACITY => Ok(bound),
        _ => Err(ConfigError::TooLarge {
            var,
            value: n,
            max: MAX_CHANNEL_CAPACITY,
        }),
    }
}
