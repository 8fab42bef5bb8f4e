use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use rand::prelude::IndexedRandom;

use crate::{
    error::Error,
    filter::FilterCriteria,
    item::Item,
    promise::Promise,
    store::{QuerySource, Subscription},
    util::Sequence,
};

#[derive(Clone, Debug)]
pub enum FilterCommand {
    SetGenre(String),
    SetPlayerCountText(String),
    ClearFilters,
    PickRandom,
    ClearRandomPick,
}

pub enum PipelineEvent {
    Command(FilterCommand),
    ItemsLoaded {
        generation: u64,
        result: Result<Vec<Item>, Error>,
    },
    GenresLoaded {
        result: Result<Vec<String>, Error>,
    },
}

/// Read-only snapshot handed to the rendering layer. Derived state, only
/// ever recomputed by [`FilterPipeline::handle`].
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub items: Promise<Vec<Item>, u64>,
    pub genres: Promise<Vec<String>>,
    pub criteria: FilterCriteria,
    pub random_pick: Option<Item>,
}

/// Keeps one live, cancel-safe item query in sync with the filter inputs.
///
/// Commands and query deliveries arrive over a single channel and are
/// applied by `handle()` on the driving thread. Changing the effective
/// criteria drops the current subscription and opens a new one under a
/// fresh generation tag; a delivery whose tag is no longer current is
/// discarded, so a superseded query can never overwrite its successor.
pub struct FilterPipeline {
    source: Arc<dyn QuerySource>,
    criteria: FilterCriteria,
    generations: Sequence<u64>,
    live_generation: u64,
    items_query: Option<Subscription>,
    _genres_query: Subscription,
    ui_state: UiState,
    sender: Sender<PipelineEvent>,
    receiver: Receiver<PipelineEvent>,
}

impl FilterPipeline {
    pub fn new(source: Arc<dyn QuerySource>) -> Self {
        let (sender, receiver) = unbounded();
        let genres_query = {
            let sender = sender.clone();
            source.subscribe_genres(Box::new(move |result| {
                let _ = sender.send(PipelineEvent::GenresLoaded { result });
            }))
        };
        let mut pipeline = Self {
            source,
            criteria: FilterCriteria::default(),
            generations: Sequence::new(1),
            live_generation: 0,
            items_query: None,
            _genres_query: genres_query,
            ui_state: UiState::default(),
            sender,
            receiver,
        };
        pipeline.ui_state.genres.defer(());
        pipeline.restart_query();
        pipeline
    }

    pub fn sender(&self) -> Sender<PipelineEvent> {
        self.sender.clone()
    }

    pub fn receiver(&self) -> Receiver<PipelineEvent> {
        self.receiver.clone()
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn handle(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Command(command) => self.handle_command(command),
            PipelineEvent::ItemsLoaded { generation, result } => {
                if generation != self.live_generation {
                    log::debug!("dropping delivery for superseded query {}", generation);
                    return;
                }
                match result {
                    Ok(items) => self.ui_state.items.resolve(items),
                    Err(err) => {
                        log::warn!("item query failed: {}", err);
                        self.ui_state.items.reject(Arc::new(err));
                    }
                }
            }
            PipelineEvent::GenresLoaded { result } => match result {
                Ok(genres) => self.ui_state.genres.resolve(genres),
                Err(err) => {
                    log::warn!("genre query failed: {}", err);
                    self.ui_state.genres.reject(Arc::new(err));
                }
            },
        }
    }

    fn handle_command(&mut self, command: FilterCommand) {
        match command {
            FilterCommand::SetGenre(genre) => {
                self.criteria.toggle_genre(&genre);
                self.restart_query();
            }
            FilterCommand::SetPlayerCountText(text) => {
                let parsed_before = self.criteria.parsed_player_count();
                self.criteria.set_player_count_text(text);
                if self.criteria.parsed_player_count() == parsed_before {
                    // Raw text changed but the effective constraint did not;
                    // the live query stays untouched.
                    self.ui_state.criteria = self.criteria.clone();
                } else {
                    self.restart_query();
                }
            }
            FilterCommand::ClearFilters => {
                let filter_before = self.criteria.filter();
                self.criteria.clear();
                if self.criteria.filter() == filter_before {
                    self.ui_state.criteria = self.criteria.clone();
                } else {
                    self.restart_query();
                }
            }
            FilterCommand::PickRandom => self.pick_random(),
            FilterCommand::ClearRandomPick => self.ui_state.random_pick = None,
        }
    }

    /// Uniform pick from the currently resolved items; no-op on an empty
    /// or unresolved list. The pick deliberately survives later filter
    /// changes until cleared or replaced.
    fn pick_random(&mut self) {
        let Some(items) = self.ui_state.items.resolved() else {
            return;
        };
        if let Some(pick) = items.choose(&mut rand::rng()) {
            self.ui_state.random_pick = Some(pick.clone());
        }
    }

    fn restart_query(&mut self) {
        // Dropping the handle cancels the previous watcher at the source
        // before the replacement opens; the generation tag catches any of
        // its deliveries already in flight.
        self.items_query.take();
        let generation = self.generations.advance();
        self.live_generation = generation;
        self.ui_state.criteria = self.criteria.clone();
        self.ui_state.items.defer(generation);
        let sender = self.sender.clone();
        let subscription = self.source.subscribe_items(
            self.criteria.filter(),
            Box::new(move |result| {
                let _ = sender.send(PipelineEvent::ItemsLoaded { generation, result });
            }),
        );
        self.items_query = Some(subscription);
    }
}
