use serde::{Deserialize, Serialize};

use crate::api::FetchResult;
use crate::model::LoadPhase;
use crate::pokemon::{Pokemon, PokemonListPage};

/// Everything that can happen to the core: shell-originated events first,
/// capability responses after. Response payloads are boxed to keep the enum
/// small.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Shell / user
    /// The list screen mounted. Triggers the initial load when the list is
    /// empty and nothing is in flight.
    AppStarted,
    /// Scroll-proximity signal from the grid. No-op while a load is in flight
    /// or once the cursor is exhausted.
    LoadMoreRequested,
    /// A card was tapped; navigation gets the already-fetched entity, no
    /// re-fetch happens.
    PokemonSelected { id: u32 },
    /// The detail screen was popped.
    DetailClosed,
    /// The load-failure alert was dismissed.
    AlertDismissed,

    // Capability responses
    ListPageLoaded {
        phase: LoadPhase,
        result: Box<FetchResult<PokemonListPage>>,
    },
    DetailLoaded {
        batch: u64,
        index: usize,
        result: Box<FetchResult<Pokemon>>,
    },
}

impl Event {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AppStarted => "app_started",
            Self::LoadMoreRequested => "load_more_requested",
            Self::PokemonSelected { .. } => "pokemon_selected",
            Self::DetailClosed => "detail_closed",
            Self::AlertDismissed => "alert_dismissed",
            Self::ListPageLoaded { .. } => "list_page_loaded",
            Self::DetailLoaded { .. } => "detail_loaded",
        }
    }
}
