//! Controller state for the catalogue list.
//!
//! The loading flow is modelled as an explicit tagged state rather than ad-hoc
//! booleans, so "no-op while busy" and "disabled after end-of-list" are
//! enforceable in isolation from rendering.

use serde::{Deserialize, Serialize};

use crate::api::FetchError;
use crate::pokemon::{Pokemon, PokemonListPage};

/// Which load a request or failure belongs to. Drives the alert copy and the
/// replace-vs-append commit.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Initial,
    More,
}

/// The three-state loading machine. Cycles between `Idle` and the two loading
/// states; there is no terminal state.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    LoadingInitial,
    LoadingMore,
}

/// A load failure surfaced to the user. Only the phase reaches the shell; the
/// error itself stays in the core for logging and tests.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoadAlert {
    pub phase: LoadPhase,
    pub error: FetchError,
}

/// Staging buffer for one page load: a slot per listed reference, filled as
/// detail responses arrive. Slots are indexed by listing position, so the
/// committed order matches the listing order no matter the arrival order.
///
/// The batch id makes results from an abandoned page self-discarding: after a
/// failure the buffer is dropped, and late siblings no longer match.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PendingPage {
    pub batch: u64,
    pub phase: LoadPhase,
    pub next: Option<String>,
    slots: Vec<Option<Pokemon>>,
    remaining: usize,
}

impl PendingPage {
    pub fn new(batch: u64, phase: LoadPhase, page: &PokemonListPage) -> Self {
        let n = page.results.len();
        Self {
            batch,
            phase,
            next: page.next.clone(),
            slots: vec![None; n],
            remaining: n,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Store one detail result. Out-of-range indices and double fills are
    /// ignored; neither can occur through the update loop.
    pub fn fill(&mut self, index: usize, pokemon: Pokemon) {
        if let Some(slot @ None) = self.slots.get_mut(index) {
            *slot = Some(pokemon);
            self.remaining -= 1;
        }
    }

    /// Consume the buffer in listing order. Only meaningful once complete;
    /// unfilled slots are skipped rather than panicking.
    pub fn into_entities(self) -> Vec<Pokemon> {
        self.slots.into_iter().flatten().collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Model {
    pub load_state: LoadState,

    /// Accumulated entities in order of first appearance across pages.
    /// Append-only; duplicates are not de-duplicated by id.
    pub pokemons: Vec<Pokemon>,

    /// Cursor for the next page; `None` before the first load and after the
    /// last page.
    pub next: Option<String>,

    /// Total count reported by the listing endpoint.
    pub count: u32,

    batch_seq: u64,
    pub pending: Option<PendingPage>,

    pub selected: Option<Pokemon>,
    pub alert: Option<LoadAlert>,
}

impl Model {
    /// The initial load runs once per mount: never while anything is in
    /// flight, and never once the list is populated.
    pub fn can_load_initial(&self) -> bool {
        self.load_state == LoadState::Idle && self.pokemons.is_empty()
    }

    /// Incremental loads are refused while any load is in flight and
    /// permanently once the cursor runs out.
    pub fn can_load_more(&self) -> bool {
        self.load_state == LoadState::Idle && self.next.is_some()
    }

    pub fn next_batch(&mut self) -> u64 {
        self.batch_seq += 1;
        self.batch_seq
    }

    pub fn set_alert(&mut self, phase: LoadPhase, error: FetchError) {
        self.alert = Some(LoadAlert { phase, error });
    }

    /// Reset the in-flight state without touching the accumulated entities or
    /// cursor. Every failure path ends here, so a failed load can never leave
    /// the controller stuck in a loading state.
    pub fn abort_load(&mut self) {
        self.pending = None;
        self.load_state = LoadState::Idle;
    }
}
