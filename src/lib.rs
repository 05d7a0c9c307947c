//! Shared core of a mobile Pokédex app.
//!
//! The core is a pure Crux state machine: shells (iOS/Android/Web) dispatch
//! [`Event`]s, `update` mutates the [`Model`] and requests effects through
//! [`Capabilities`], and `view` projects the model into a serializable
//! [`ViewModel`]. All networking goes through the HTTP capability; the core
//! itself performs no IO.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod capabilities;
pub mod event;
pub mod model;
pub mod pokemon;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use event::Event;
pub use model::{LoadPhase, LoadState, Model};
pub use view::{ViewModel, ViewState};

/// Fixed page size for both the initial and incremental loads.
pub const PAGE_SIZE: u32 = 20;

pub mod app {
    use tracing::{debug, warn};

    use crate::api::{self, FetchResult};
    use crate::capabilities::Capabilities;
    use crate::event::Event;
    use crate::model::{LoadPhase, LoadState, Model, PendingPage};
    use crate::pokemon::{Pokemon, PokemonListPage};
    use crate::view::{self, AlertView, ViewModel, ViewState};
    use crate::PAGE_SIZE;

    #[derive(Default)]
    pub struct App;

    impl App {
        /// Kick off a page load. Callers have already checked the state
        /// machine; this sets the in-flight tag and issues the listing
        /// request at offset = accumulated count.
        fn begin_page_load(model: &mut Model, caps: &Capabilities, phase: LoadPhase) {
            model.load_state = match phase {
                LoadPhase::Initial => LoadState::LoadingInitial,
                LoadPhase::More => LoadState::LoadingMore,
            };

            let offset = model.pokemons.len() as u32;
            debug!(?phase, offset, "requesting list page");
            api::fetch_page(&caps.http, offset, PAGE_SIZE, phase);
        }

        /// A listing page arrived: fan out one detail request per reference
        /// and stage a slot for each. All of them must succeed before
        /// anything is committed.
        fn handle_page_loaded(
            phase: LoadPhase,
            result: FetchResult<PokemonListPage>,
            model: &mut Model,
            caps: &Capabilities,
        ) {
            if model.load_state == LoadState::Idle {
                // Not ours; no load is in flight.
                debug!("ignoring list page with no load in flight");
                return;
            }

            let page = match result {
                Ok(page) => page,
                Err(error) => {
                    warn!(%error, ?phase, "list page load failed");
                    model.set_alert(phase, error);
                    model.abort_load();
                    return;
                }
            };

            model.count = page.count;
            let batch = model.next_batch();
            let pending = PendingPage::new(batch, phase, &page);

            for (index, reference) in page.results.iter().enumerate() {
                if let Err(error) = api::fetch_detail(&caps.http, &reference.url, batch, index) {
                    // Siblings already issued will come back with this batch
                    // id and find no staging buffer; they are discarded.
                    warn!(%error, name = %reference.name, "bad entity reference");
                    model.set_alert(phase, error);
                    model.abort_load();
                    return;
                }
            }

            if pending.is_complete() {
                // Page listed nothing; commit the (empty) increment directly.
                Self::commit_page(model, pending);
            } else {
                model.pending = Some(pending);
            }
        }

        /// One detail document arrived. Fill its slot; commit when the page
        /// is complete, kill the whole batch on the first failure.
        fn handle_detail_loaded(
            batch: u64,
            index: usize,
            result: FetchResult<Pokemon>,
            model: &mut Model,
        ) {
            let Some(pending) = model.pending.as_mut() else {
                // Sibling of a batch that already failed, or a response for
                // an unmounted screen. Discard.
                debug!(batch, index, "discarding detail for inactive batch");
                return;
            };
            if pending.batch != batch {
                debug!(batch, index, "discarding detail for stale batch");
                return;
            }

            let phase = pending.phase;
            match result {
                Ok(pokemon) => {
                    pending.fill(index, pokemon);
                    if pending.is_complete() {
                        if let Some(done) = model.pending.take() {
                            Self::commit_page(model, done);
                        }
                    }
                }
                Err(error) => {
                    // Fail fast: the first failure discards the entire page.
                    // Outstanding sibling requests are not cancelled; their
                    // results no longer match a staging buffer.
                    warn!(%error, ?phase, index, "detail load failed");
                    model.set_alert(phase, error);
                    model.abort_load();
                }
            }
        }

        /// All-success barrier passed: merge the staged page into the
        /// accumulated list and store the new cursor.
        fn commit_page(model: &mut Model, page: PendingPage) {
            let phase = page.phase;
            let next = page.next.clone();
            let entities = page.into_entities();

            match phase {
                LoadPhase::Initial => model.pokemons = entities,
                LoadPhase::More => model.pokemons.extend(entities),
            }

            model.next = next;
            model.load_state = LoadState::Idle;
            debug!(?phase, total = model.pokemons.len(), "page committed");
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            debug!(event = event.name(), "update");

            match event {
                Event::AppStarted => {
                    if !model.can_load_initial() {
                        return;
                    }
                    Self::begin_page_load(model, caps, LoadPhase::Initial);
                    caps.render.render();
                }

                Event::LoadMoreRequested => {
                    // No-op while any load is in flight or once the cursor is
                    // exhausted.
                    if !model.can_load_more() {
                        return;
                    }
                    Self::begin_page_load(model, caps, LoadPhase::More);
                    caps.render.render();
                }

                Event::ListPageLoaded { phase, result } => {
                    Self::handle_page_loaded(phase, *result, model, caps);
                    caps.render.render();
                }

                Event::DetailLoaded {
                    batch,
                    index,
                    result,
                } => {
                    Self::handle_detail_loaded(batch, index, *result, model);
                    caps.render.render();
                }

                Event::PokemonSelected { id } => {
                    // Navigation gets the entity that was already fetched for
                    // the grid; no network round-trip.
                    model.selected = model.pokemons.iter().find(|p| p.id == id).cloned();
                    caps.render.render();
                }

                Event::DetailClosed => {
                    model.selected = None;
                    caps.render.render();
                }

                Event::AlertDismissed => {
                    model.alert = None;
                    caps.render.render();
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            let state = if model.load_state == LoadState::LoadingInitial && model.pokemons.is_empty()
            {
                ViewState::Loading
            } else {
                ViewState::Grid {
                    cards: model.pokemons.iter().map(view::card_for).collect(),
                    loading_more: model.load_state == LoadState::LoadingMore,
                    end_reached: !model.pokemons.is_empty() && model.next.is_none(),
                }
            };

            ViewModel {
                state,
                detail: model.selected.as_ref().map(view::detail_for),
                alert: model.alert.as_ref().map(AlertView::from),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::field_reassign_with_default)]
mod tests {
    use super::*;
    use crate::model::{LoadPhase, LoadState};
    use crate::pokemon::{Pokemon, Sprites};
    use crate::view::ViewState;
    use crux_core::App as _;

    fn dummy(id: u32) -> Pokemon {
        Pokemon {
            id,
            name: format!("pokemon-{id}"),
            height: 7,
            weight: 69,
            sprites: Sprites {
                front_default: None,
            },
            types: vec![],
            abilities: vec![],
            stats: vec![],
        }
    }

    #[test]
    fn view_is_fullscreen_loading_during_initial_load() {
        let app = App::default();
        let mut model = Model::default();
        model.load_state = LoadState::LoadingInitial;

        assert_eq!(app.view(&model).state, ViewState::Loading);
    }

    #[test]
    fn view_flags_incremental_load_in_the_grid() {
        let app = App::default();
        let mut model = Model::default();
        model.pokemons.push(dummy(1));
        model.next = Some("cursor".into());
        model.load_state = LoadState::LoadingMore;

        match app.view(&model).state {
            ViewState::Grid {
                cards,
                loading_more,
                end_reached,
            } => {
                assert_eq!(cards.len(), 1);
                assert!(loading_more);
                assert!(!end_reached);
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn view_marks_end_of_list_once_cursor_is_exhausted() {
        let app = App::default();
        let mut model = Model::default();
        model.pokemons.push(dummy(1));
        model.next = None;

        match app.view(&model).state {
            ViewState::Grid { end_reached, .. } => assert!(end_reached),
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn selected_entity_projects_a_detail_view() {
        let app = App::default();
        let mut model = Model::default();
        model.pokemons.push(dummy(7));
        model.selected = Some(dummy(7));

        let detail = app.view(&model).detail.expect("detail view");
        assert_eq!(detail.id, 7);
        assert_eq!(detail.name, "Pokemon-7");
    }

    #[test]
    fn alert_projects_phase_specific_copy() {
        let app = App::default();
        let mut model = Model::default();
        model.set_alert(LoadPhase::More, crate::api::FetchError::Status(500));

        let alert = app.view(&model).alert.expect("alert view");
        assert_eq!(alert.message, "Could not load more Pokémon");
    }
}
