//! Typed clients: the product store client and the PokeAPI client.

pub mod pokeapi;
pub mod product_client;

pub use pokeapi::{AbilityApi, Endpoint, FetchError, PokeApiClient};
pub use product_client::ProductClient;
