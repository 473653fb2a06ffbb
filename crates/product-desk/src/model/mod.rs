//! Pure data structures: the product entity and its staging form, and the PokeAPI bodies.

pub mod pokemon;
pub mod product;

pub use pokemon::*;
pub use product::*;
