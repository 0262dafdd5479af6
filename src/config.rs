//! Runtime configuration.
//!
//! Every setting has a default, so an empty environment gives a working system.
//!
//! | Variable | Default |
//! |---|---|
//! | `MARKET_ACTOR_BUFFER` | `32` |
//! | `MARKET_MIRROR_ENABLED` | `true` |
//! | `MARKET_READ_PREFERENCE` | `mirror-first` (or `local-only`) |
//! | `MARKET_PURCHASE_MODE` | `conditional` (or `read-then-write`) |
//! | `MARKET_VERIFIED_REVIEW_THRESHOLD` | `10` |

use std::str::FromStr;

use thiserror::Error;

use crate::purchase::ClaimStrategy;
use crate::rating::DEFAULT_VERIFIED_THRESHOLD;
use crate::replication::{ReadPreference, SyncPolicy};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketConfig {
    /// Mailbox size of every store actor.
    pub actor_buffer: usize,
    /// Spawn mirror stores for properties, transactions and users.
    pub mirror_enabled: bool,
    pub read_preference: ReadPreference,
    pub claim_strategy: ClaimStrategy,
    /// Reviews a locality needs before it is marked verified.
    pub verified_review_threshold: u32,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            actor_buffer: 32,
            mirror_enabled: true,
            read_preference: ReadPreference::MirrorFirst,
            claim_strategy: ClaimStrategy::ConditionalUpdate,
            verified_review_threshold: DEFAULT_VERIFIED_THRESHOLD,
        }
    }
}

impl MarketConfig {
    /// Loads configuration from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let actor_buffer: usize = parse_or(&lookup, "MARKET_ACTOR_BUFFER", defaults.actor_buffer)?;
        if actor_buffer == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "MARKET_ACTOR_BUFFER".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            actor_buffer,
            mirror_enabled: parse_or(&lookup, "MARKET_MIRROR_ENABLED", defaults.mirror_enabled)?,
            read_preference: parse_or(&lookup, "MARKET_READ_PREFERENCE", defaults.read_preference)?,
            claim_strategy: parse_or(&lookup, "MARKET_PURCHASE_MODE", defaults.claim_strategy)?,
            verified_review_threshold: parse_or(
                &lookup,
                "MARKET_VERIFIED_REVIEW_THRESHOLD",
                defaults.verified_review_threshold,
            )?,
        })
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        SyncPolicy {
            read: self.read_preference,
            mirror_writes: self.mirror_enabled,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = MarketConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MarketConfig::default());
        assert_eq!(config.sync_policy(), SyncPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let config = MarketConfig::from_lookup(lookup(&[
            ("MARKET_ACTOR_BUFFER", "8"),
            ("MARKET_MIRROR_ENABLED", "false"),
            ("MARKET_READ_PREFERENCE", "local-only"),
            ("MARKET_PURCHASE_MODE", "read-then-write"),
            ("MARKET_VERIFIED_REVIEW_THRESHOLD", "3"),
        ]))
        .unwrap();
        assert_eq!(config.actor_buffer, 8);
        assert!(!config.mirror_enabled);
        assert_eq!(config.read_preference, ReadPreference::LocalOnly);
        assert_eq!(config.claim_strategy, ClaimStrategy::ReadThenWrite);
        assert_eq!(config.verified_review_threshold, 3);
        assert!(!config.sync_policy().mirror_writes);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = MarketConfig::from_lookup(lookup(&[("MARKET_PURCHASE_MODE", "yolo")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MARKET_PURCHASE_MODE"));

        let err = MarketConfig::from_lookup(lookup(&[("MARKET_ACTOR_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MARKET_ACTOR_BUFFER"));
    }
}
