//! # Desk Lifecycle & Orchestration
//!
//! The product actor is simple on its own; the [`ProductDesk`] is where it meets the rest of
//! the page. It starts the actor, keeps the [`DeskState`](crate::session::DeskState) in step
//! with what the store answered, and owns the search debouncer.
//!
//! ## Startup
//!
//! ```rust,ignore
//! let (actor, resource_client) = product_actor::new(config.channel_buffer);
//! let handle = tokio::spawn(actor.run(()));
//! ```
//!
//! The product entity has no dependencies, so its `Context` is `()`.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the debouncer** - Aborts its timer task; a pending search is discarded
//! 2. **Drop the client** - Closes the sender side of the actor's channel
//! 3. **Actor detects closure** - `receiver.recv()` returns `None` and the loop ends
//! 4. **Await completion** - A panicked actor task is reported as an error
//!
//! ## Observability
//!
//! Tracing is set up once by the binary with
//! [`setup_tracing`](resource_actor::tracing::setup_tracing):
//!
//! ```bash
//! RUST_LOG=info product-desk demo      # Lifecycle events
//! RUST_LOG=debug product-desk demo     # Every request and payload
//! ```

pub mod desk;

pub use desk::*;
