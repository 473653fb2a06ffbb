//! Response bodies of the PokeAPI ability endpoints.
//!
//! Only the fields the Pokémon page reads are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Shown when an ability has no English effect entry.
pub const NO_ENGLISH_EFFECT: &str = "No English effect available";

/// `GET /ability?limit=N`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityList {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A `{ name, url }` reference to another PokeAPI resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// `GET /ability/{name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDetail {
    pub name: String,
    pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectEntry {
    pub effect: String,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

impl AbilityDetail {
    /// The effect text of the first entry written in English.
    ///
    /// Falls back to [`NO_ENGLISH_EFFECT`] when there is none or its text is empty.
    pub fn english_effect(&self) -> &str {
        self.effect_entries
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| entry.effect.as_str())
            .filter(|effect| !effect.is_empty())
            .unwrap_or(NO_ENGLISH_EFFECT)
    }
}
