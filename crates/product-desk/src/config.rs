//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PRODUCT_DESK_DEBOUNCE_MS` | `300` |
//! | `PRODUCT_DESK_CHANNEL_BUFFER` | `32` |
//! | `POKEAPI_BASE_URL` | `https://pokeapi.co/api/v2` |
//! | `POKEAPI_LIST_LIMIT` | `20` |
//! | `POKEAPI_FEATURED_ABILITY` | `battle-armor` |

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Helper to load an environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Helper to load and parse an environment variable with a default value
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Where the Pokémon page fetches from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokeApiConfig {
    pub base_url: String,
    /// `limit` query parameter of the ability list.
    pub list_limit: u32,
    /// Ability shown in the detail section.
    pub featured_ability: String,
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
            list_limit: 20,
            featured_ability: "battle-armor".to_string(),
        }
    }
}

impl PokeApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            base_url: env_or_default("POKEAPI_BASE_URL", &defaults.base_url),
            list_limit: env_parse_or("POKEAPI_LIST_LIMIT", defaults.list_limit)?,
            featured_ability: env_or_default("POKEAPI_FEATURED_ABILITY", &defaults.featured_ability),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    /// Quiet period before a typed search is applied.
    pub search_debounce: Duration,
    /// Capacity of the product actor's request channel.
    pub channel_buffer: usize,
    pub pokeapi: PokeApiConfig,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
            channel_buffer: 32,
            pokeapi: PokeApiConfig::default(),
        }
    }
}

impl DeskConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let debounce_ms = env_parse_or(
            "PRODUCT_DESK_DEBOUNCE_MS",
            defaults.search_debounce.as_millis() as u64,
        )?;
        let channel_buffer = env_parse_or("PRODUCT_DESK_CHANNEL_BUFFER", defaults.channel_buffer)?;
        if channel_buffer == 0 {
            return Err(ConfigError::ParseError {
                key: "PRODUCT_DESK_CHANNEL_BUFFER".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            search_debounce: Duration::from_millis(debounce_ms),
            channel_buffer,
            pokeapi: PokeApiConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: [&str; 5] = [
        "PRODUCT_DESK_DEBOUNCE_MS",
        "PRODUCT_DESK_CHANNEL_BUFFER",
        "POKEAPI_BASE_URL",
        "POKEAPI_LIST_LIMIT",
        "POKEAPI_FEATURED_ABILITY",
    ];

    #[test]
    fn test_defaults_without_environment() {
        temp_env::with_vars_unset(KEYS, || {
            let config = DeskConfig::from_env().unwrap();
            assert_eq!(config, DeskConfig::default());
            assert_eq!(config.search_debounce, Duration::from_millis(300));
            assert_eq!(config.pokeapi.base_url, "https://pokeapi.co/api/v2");
            assert_eq!(config.pokeapi.list_limit, 20);
        });
    }

    #[test]
    fn test_overrides_from_environment() {
        temp_env::with_vars(
            [
                ("PRODUCT_DESK_DEBOUNCE_MS", Some("50")),
                ("PRODUCT_DESK_CHANNEL_BUFFER", Some("4")),
                ("POKEAPI_BASE_URL", Some("http://localhost:8080")),
                ("POKEAPI_LIST_LIMIT", Some(" 5 ")),
                ("POKEAPI_FEATURED_ABILITY", Some("stench")),
            ],
            || {
                let config = DeskConfig::from_env().unwrap();
                assert_eq!(config.search_debounce, Duration::from_millis(50));
                assert_eq!(config.channel_buffer, 4);
                assert_eq!(config.pokeapi.base_url, "http://localhost:8080");
                assert_eq!(config.pokeapi.list_limit, 5);
                assert_eq!(config.pokeapi.featured_ability, "stench");
            },
        );
    }

    #[test]
    fn test_bad_number_names_the_variable() {
        temp_env::with_var("POKEAPI_LIST_LIMIT", Some("twenty"), || {
            let err = PokeApiConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("POKEAPI_LIST_LIMIT"));
        });
    }

    #[test]
    fn test_zero_channel_buffer_is_rejected() {
        temp_env::with_var("PRODUCT_DESK_CHANNEL_BUFFER", Some("0"), || {
            assert!(DeskConfig::from_env().is_err());
        });
    }
}
