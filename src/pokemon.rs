//! Wire types for the PokeAPI catalogue.
//!
//! These mirror the JSON documents served by `pokeapi.co` field for field, so
//! they deserialize straight off the response body. Entities are never mutated
//! after they are fetched.

use serde::{Deserialize, Serialize};

/// A name/url pair, used by the API wherever it links to another resource.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Lightweight reference returned by the listing endpoint; the full entity
/// lives behind `url`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PokemonRef {
    pub name: String,
    pub url: String,
}

/// One page of the paginated listing.
///
/// `next` is the cursor for the following page; `None` means end of list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PokemonListPage {
    pub count: u32,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PokemonRef>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Sprites {
    // Nullable in the live API for some forms, despite most clients assuming
    // it is always present.
    pub front_default: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PokemonAbility {
    pub ability: NamedResource,
    pub is_hidden: bool,
    pub slot: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

/// A fully materialized catalogue entity.
///
/// `height` is in decimetres and `weight` in hectograms, as served by the API;
/// the view layer converts to metres/kilograms.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub sprites: Sprites,
    pub types: Vec<PokemonType>,
    pub abilities: Vec<PokemonAbility>,
    pub stats: Vec<PokemonStat>,
}

impl Pokemon {
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(|t| t.kind.name.as_str())
    }

    pub fn sprite_url(&self) -> &str {
        self.sprites.front_default.as_deref().unwrap_or_default()
    }
}
