//! Engine configuration
//!
//! Defaults match the classic timings (one row every 500ms, one second of
//! lock delay). Every value can be overridden from the environment:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `BLOCKFALL_SEED` | piece RNG seed |
//! | `BLOCKFALL_TICK_MS` | gravity interval in milliseconds |
//! | `BLOCKFALL_LOCK_GRACE_MS` | lock delay in milliseconds |

use std::time::Duration;

use crate::types::{LOCK_GRACE_MS, TICK_INTERVAL_MS};

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const TICK_MS_VAR: &str = "BLOCKFALL_TICK_MS";
pub const LOCK_GRACE_MS_VAR: &str = "BLOCKFALL_LOCK_GRACE_MS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub seed: u32,
    /// Gravity interval of the periodic tick
    pub tick_interval: Duration,
    /// Quiet period after the last player action before a grounded piece locks
    pub lock_grace: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            lock_grace: Duration::from_millis(LOCK_GRACE_MS),
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Create from environment variables; `fallback_seed` is used when
    /// `BLOCKFALL_SEED` is unset.
    pub fn from_env(fallback_seed: u32) -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok(), fallback_seed)
    }

    /// Create from any key/value source (the environment in production).
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        fallback_seed: u32,
    ) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let seed = parse_var(&lookup, SEED_VAR)?
            .map(|v| v as u32)
            .unwrap_or(fallback_seed);
        let tick_interval = parse_var(&lookup, TICK_MS_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick_interval);
        let lock_grace = parse_var(&lookup, LOCK_GRACE_MS_VAR)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.lock_grace);

        let config = Self {
            seed,
            tick_interval,
            lock_grace,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if var == SEED_VAR {
        // Seeds are 32-bit; reject anything wider instead of truncating.
        return trimmed
            .parse::<u32>()
            .map(|v| Some(v as u64))
            .map_err(|_| ConfigError::InvalidNumber { var, value: raw });
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var, value: raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let cfg = EngineConfig::from_lookup(lookup(&[]), 42).unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.tick_interval, Duration::from_millis(500));
        assert_eq!(cfg.lock_grace, Duration::from_millis(1000));
    }

    #[test]
    fn test_overrides() {
        let cfg = EngineConfig::from_lookup(
            lookup(&[
                ("BLOCKFALL_SEED", "7"),
                ("BLOCKFALL_TICK_MS", " 250 "),
                ("BLOCKFALL_LOCK_GRACE_MS", "0"),
            ]),
            42,
        )
        .unwrap();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.tick_interval, Duration::from_millis(250));
        assert_eq!(cfg.lock_grace, Duration::ZERO);
    }

    #[test]
    fn test_blank_value_falls_back_to_default() {
        let cfg = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_TICK_MS", "")]), 1).unwrap();
        assert_eq!(cfg.tick_interval, Duration::from_millis(500));
    }

    #[test]
    fn test_invalid_number_is_reported() {
        let err = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_TICK_MS", "fast")]), 1)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: TICK_MS_VAR,
                value: "fast".to_string()
            }
        );
        assert!(err.to_string().contains("BLOCKFALL_TICK_MS"));
    }

    #[test]
    fn test_seed_wider_than_u32_is_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_SEED", "4294967296")]), 1)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: SEED_VAR, .. }));
    }

    #[test]
    fn test_zero_tick_interval_is_rejected() {
        let err = EngineConfig::from_lookup(lookup(&[("BLOCKFALL_TICK_MS", "0")]), 1).unwrap_err();
        assert_eq!(err, ConfigError::ZeroTickInterval);
    }
}
