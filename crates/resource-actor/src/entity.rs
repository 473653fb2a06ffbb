//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract a resource must implement to be managed by the
//! generic `ResourceActor`. It specifies associated types for IDs, DTOs, context and errors,
//! and provides lifecycle hooks (`check_create`, `check_update`, `on_create`, `on_update`,
//! `on_delete`).
//!
//! # Collection-aware checks
//! Some rules cannot be decided by a single entity in isolation (a name that must be unique
//! across the collection, for example). The `check_*` hooks receive a read-only view of every
//! entity the actor currently holds, in insertion order, before anything is mutated. A failing
//! check leaves the store untouched.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::check_create`]
//! - [`ActorEntity::check_update`]
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! The default implementations do nothing (`Ok(())`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// This trait is `#[async_trait]` to allow asynchronous operations in hooks.
/// It also defines a `Context` type, which is injected into every async hook. Dependencies are
/// passed to `run()` instead of `new()`.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than one per message. Clients pattern match a single
    /// type; the framework boxes it into [`FrameworkError::EntityError`](crate::FrameworkError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier this entity was created with.
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously after `check_create` and before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Collection Checks (Sync) ---

    /// Validates a create payload against the current collection.
    fn check_create(_params: &Self::Create, _existing: &[Self]) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Validates an update payload for `id` against the current collection.
    /// `existing` still contains the entity being updated.
    fn check_update(
        _id: &Self::Id,
        _update: &Self::Update,
        _existing: &[Self],
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
