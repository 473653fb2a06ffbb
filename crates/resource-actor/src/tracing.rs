//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate for any binary
//! built on the framework.
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); actors log an
//! `entity_type` field instead, which keeps lines short while still saying where they came from.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown with the final store size
//! - **Entity Operations**: Create, Get, List, Update, Delete
//! - **Rejections**: failed checks and hooks with the entity ID and the error
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```
//!
//! With `RUST_LOG=debug` the actor records each payload once, using the `?` field syntax:
//!
//! ```text
//! DEBUG Create entity_type="Product" params=ProductFormData { name: "Mouse", price: "250000", stock: "20" }
//! INFO Created entity_type="Product" id=2 size=2
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
