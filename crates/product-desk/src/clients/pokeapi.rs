//! # PokeAPI Client
//!
//! Read-only access to the two ability endpoints the Pokémon page shows. The page talks to
//! the [`AbilityApi`] trait so tests can swap the HTTP client for a canned one.

use crate::config::PokeApiConfig;
use crate::model::{AbilityDetail, AbilityList};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Which endpoint a fetch went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AbilityList,
    AbilityDetail,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::AbilityList => "abilities",
            Endpoint::AbilityDetail => "ability detail",
        })
    }
}

/// Failure of one PokeAPI call. Never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("Failed to fetch {endpoint}")]
    Status { endpoint: Endpoint, status: u16 },

    /// The request could not be sent, or the body was not the expected JSON.
    #[error("Failed to fetch {endpoint}: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait AbilityApi: Send + Sync {
    /// The first page of abilities.
    async fn list_abilities(&self) -> Result<AbilityList, FetchError>;

    /// Details of one ability, by PokeAPI name (e.g. `battle-armor`).
    async fn ability_detail(&self, name: &str) -> Result<AbilityDetail, FetchError>;
}

/// `reqwest`-backed [`AbilityApi`].
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    config: PokeApiConfig,
    client: Client,
}

impl PokeApiClient {
    pub fn new(config: PokeApiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn list_url(&self) -> String {
        format!(
            "{}/ability?limit={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.list_limit
        )
    }

    pub fn detail_url(&self, name: &str) -> String {
        format!(
            "{}/ability/{}",
            self.config.base_url.trim_end_matches('/'),
            name
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: String,
    ) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let transport = |source| FetchError::Transport { endpoint, source };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Non-success status");
            return Err(FetchError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        response.json::<T>().await.map_err(transport)
    }
}

#[async_trait]
impl AbilityApi for PokeApiClient {
    #[instrument(skip(self))]
    async fn list_abilities(&self) -> Result<AbilityList, FetchError> {
        self.get_json(Endpoint::AbilityList, self.list_url()).await
    }

    #[instrument(skip(self))]
    async fn ability_detail(&self, name: &str) -> Result<AbilityDetail, FetchError> {
        self.get_json(Endpoint::AbilityDetail, self.detail_url(name))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> PokeApiClient {
        PokeApiClient::new(PokeApiConfig {
            base_url: base_url.to_string(),
            list_limit: 20,
            featured_ability: "battle-armor".to_string(),
        })
    }

    #[test]
    fn test_urls() {
        let api = client("https://pokeapi.co/api/v2/");
        assert_eq!(api.list_url(), "https://pokeapi.co/api/v2/ability?limit=20");
        assert_eq!(
            api.detail_url("battle-armor"),
            "https://pokeapi.co/api/v2/ability/battle-armor"
        );
    }

    #[test]
    fn test_status_errors_use_generic_messages() {
        let list = FetchError::Status {
            endpoint: Endpoint::AbilityList,
            status: 503,
        };
        assert_eq!(list.to_string(), "Failed to fetch abilities");

        let detail = FetchError::Status {
            endpoint: Endpoint::AbilityDetail,
            status: 404,
        };
        assert_eq!(detail.to_string(), "Failed to fetch ability detail");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let api = client("http://127.0.0.1:9/api/v2");
        let err = api.list_abilities().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport {
                endpoint: Endpoint::AbilityList,
                ..
            }
        ));
    }
}
