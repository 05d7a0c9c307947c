//! View model: the serializable projection of [`crate::Model`] that shells
//! render. Pure mapping, no behaviour.

use serde::{Deserialize, Serialize};

use crate::model::{LoadAlert, LoadPhase};
use crate::pokemon::Pokemon;

pub const FALLBACK_TYPE_COLOR: &str = "#777";

/// Card background / badge colour keyed off a type name.
pub fn type_color(type_name: &str) -> &'static str {
    match type_name {
        "normal" => "#A8A878",
        "fire" => "#F08030",
        "water" => "#6890F0",
        "electric" => "#F8D030",
        "grass" => "#78C850",
        "ice" => "#98D8D8",
        "fighting" => "#C03028",
        "poison" => "#A040A0",
        "ground" => "#E0C068",
        "flying" => "#A890F0",
        "psychic" => "#F85888",
        "bug" => "#A8B820",
        "rock" => "#B8A038",
        "ghost" => "#705898",
        "dragon" => "#7038F8",
        "dark" => "#705848",
        "steel" => "#B8B8D0",
        "fairy" => "#EE99AC",
        _ => FALLBACK_TYPE_COLOR,
    }
}

/// "bulbasaur" -> "Bulbasaur". API names are ASCII lowercase.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// "#001"-style dex number; ids beyond three digits keep their full width.
pub fn format_number(id: u32) -> String {
    format!("#{id:03}")
}

/// API heights are decimetres.
pub fn format_height(decimetres: u32) -> String {
    format!("{:.1} m", decimetres as f64 / 10.0)
}

/// API weights are hectograms.
pub fn format_weight(hectograms: u32) -> String {
    format!("{:.1} kg", hectograms as f64 / 10.0)
}

/// "lightning-rod" -> "lightning rod".
pub fn humanize(name: &str) -> String {
    name.replace('-', " ")
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TypeBadge {
    pub label: String,
    pub color: String,
}

/// One grid cell on the home screen.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PokemonCard {
    pub id: u32,
    pub number: String,
    pub name: String,
    pub sprite: String,
    pub color: String,
    /// One-letter badges, e.g. ["G", "P"] for grass/poison.
    pub type_initials: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AbilityView {
    pub name: String,
    pub is_hidden: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StatRow {
    pub name: String,
    pub value: u32,
    /// Bar fill, value clamped to 150 then scaled to 0..=100.
    pub fill_pct: u8,
    pub color: String,
}

/// Full detail screen content, built from an entity that was already fetched
/// for the grid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PokemonDetail {
    pub id: u32,
    pub number: String,
    pub name: String,
    pub sprite: String,
    pub color: String,
    pub types: Vec<TypeBadge>,
    pub height: String,
    pub weight: String,
    pub abilities: Vec<AbilityView>,
    pub stats: Vec<StatRow>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AlertView {
    pub title: String,
    pub message: String,
}

impl From<&LoadAlert> for AlertView {
    fn from(alert: &LoadAlert) -> Self {
        // Only the phase reaches the user; no structured error detail.
        let message = match alert.phase {
            LoadPhase::Initial => "Could not load the Pokémon list",
            LoadPhase::More => "Could not load more Pokémon",
        };
        Self {
            title: "Error".to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Full-screen spinner while the very first page is loading.
    Loading,
    Grid {
        cards: Vec<PokemonCard>,
        /// Footer spinner for an in-flight incremental load.
        loading_more: bool,
        /// The cursor is exhausted; no further pages exist.
        end_reached: bool,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub state: ViewState,
    /// Present while the detail screen is pushed.
    pub detail: Option<PokemonDetail>,
    pub alert: Option<AlertView>,
}

pub fn card_for(pokemon: &Pokemon) -> PokemonCard {
    let color = pokemon
        .primary_type()
        .map(type_color)
        .unwrap_or(FALLBACK_TYPE_COLOR);

    PokemonCard {
        id: pokemon.id,
        number: format_number(pokemon.id),
        name: display_name(&pokemon.name),
        sprite: pokemon.sprite_url().to_string(),
        color: color.to_string(),
        type_initials: pokemon
            .types
            .iter()
            .filter_map(|t| t.kind.name.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .collect(),
    }
}

pub fn detail_for(pokemon: &Pokemon) -> PokemonDetail {
    let color = pokemon
        .primary_type()
        .map(type_color)
        .unwrap_or(FALLBACK_TYPE_COLOR);

    PokemonDetail {
        id: pokemon.id,
        number: format_number(pokemon.id),
        name: display_name(&pokemon.name),
        sprite: pokemon.sprite_url().to_string(),
        color: color.to_string(),
        types: pokemon
            .types
            .iter()
            .map(|t| TypeBadge {
                label: t.kind.name.to_uppercase(),
                color: type_color(&t.kind.name).to_string(),
            })
            .collect(),
        height: format_height(pokemon.height),
        weight: format_weight(pokemon.weight),
        abilities: pokemon
            .abilities
            .iter()
            .map(|a| AbilityView {
                name: humanize(&a.ability.name),
                is_hidden: a.is_hidden,
            })
            .collect(),
        stats: pokemon.stats.iter().map(stat_row).collect(),
    }
}

fn stat_row(stat: &crate::pokemon::PokemonStat) -> StatRow {
    let clamped = stat.base_stat.min(150);
    let color = if stat.base_stat > 80 {
        "#4CAF50"
    } else if stat.base_stat > 50 {
        "#FFC107"
    } else {
        "#F44336"
    };

    StatRow {
        name: humanize(&stat.stat.name),
        value: stat.base_stat,
        fill_pct: (clamped * 100 / 150) as u8,
        color: color.to_string(),
    }
}
