//! # Product Actor
//!
//! The in-memory product store: a [`ResourceActor`] over [`Product`] entities.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Rules
//!
//! Create and update payloads are [`ProductFormData`](crate::model::ProductFormData) staging
//! records. The actor validates them against the whole collection before mutating anything:
//! names must be present and unique ignoring case, price a positive number, stock a positive
//! integer. Updates keep the product's id and its position in the collection.
//!
//! ## Usage
//!
//! ```rust
//! use product_desk::clients::ProductClient;
//! use product_desk::model::ProductFormData;
//! use product_desk::product_actor;
//! use resource_actor::ActorClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductFormData::new("Widget", "29.99", "100"))
//!         .await?;
//!     let widget = client.get(id).await?.expect("just created");
//!     assert_eq!(widget.stock, 100);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Product;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
