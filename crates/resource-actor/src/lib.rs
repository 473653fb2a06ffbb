//! # Resource Actor
//!
//! Building blocks for type-safe, in-memory resource stores that live inside a single Tokio
//! task. Each store is a [`ResourceActor`] owning an ordered collection of one entity type and
//! serving CRUD requests sent through a cloneable [`ResourceClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - domain model, validation hooks and lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing and exclusive state ownership
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - type-safe communication
//!
//! You write the business rules once in the entity trait; the framework handles message
//! passing, error boxing and ordering.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor, so no locks are needed
//! - The collection keeps insertion order; updates happen in place
//!
//! ## Errors
//!
//! Entity errors travel back to the caller boxed in [`FrameworkError::EntityError`].
//! [`FrameworkError::into_entity_error`] recovers the concrete type on the client side.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers client requests from a queue of expectations, so client
//! wrappers can be tested without running an actor.
//!
//! Further reading: [Actors with Tokio](https://ryhl.io/blog/actors-with-tokio/).

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
