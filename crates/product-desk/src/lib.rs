//! # Product Desk Library
//!
//! Product management (list, add, edit, delete, search, sort) over an in-memory product actor,
//! plus a read-only Pokémon ability page backed by PokeAPI.

pub mod catalog;
pub mod clients;
pub mod config;
pub mod debounce;
pub mod lifecycle;
pub mod model;
pub mod pokemon_page;
pub mod product_actor;
pub mod session;
pub mod validation;
