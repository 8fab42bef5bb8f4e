pub mod memory;

pub use memory::{MemoryStore, StoreHandle};

use crate::{
    error::Error,
    item::{Item, ItemDraft, ItemId},
};

pub type ItemsCallback = Box<dyn Fn(Result<Vec<Item>, Error>) + Send>;
pub type GenresCallback = Box<dyn Fn(Result<Vec<String>, Error>) + Send>;

/// Query-side form of the filter inputs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Filter {
    pub genre: Option<String>,
    pub player_count: Option<u32>,
}

impl Filter {
    pub fn matches(&self, item: &Item) -> bool {
        let genre_ok = match &self.genre {
            Some(genre) => item.genre.as_deref() == Some(genre.as_str()),
            None => true,
        };
        // An item without a declared player range never matches an active
        // player-count constraint.
        let players_ok = match self.player_count {
            Some(count) => {
                item.min_players.is_some_and(|min| min <= count)
                    && item.max_players.is_some_and(|max| count <= max)
            }
            None => true,
        };
        genre_ok && players_ok
    }
}

/// The item store as consumed by the rest of the crate. Live queries push
/// a fresh snapshot to `notify` on every data change, starting with an
/// immediate replay of the current value; an `Err` delivery terminates
/// that subscription.
pub trait QuerySource: Send + Sync {
    /// Live query over items matching `filter`, name-ascending.
    fn subscribe_items(&self, filter: Filter, notify: ItemsCallback) -> Subscription;

    /// Live query over the distinct non-empty genres, ascending.
    fn subscribe_genres(&self, notify: GenresCallback) -> Subscription;

    fn get(&self, id: ItemId) -> Result<Option<Item>, Error>;

    fn insert(&self, draft: ItemDraft) -> Result<ItemId, Error>;

    fn update(&self, item: Item) -> Result<(), Error>;

    fn delete(&self, id: ItemId) -> Result<(), Error>;

    /// Live query over all items, name-ascending.
    fn subscribe_all(&self, notify: ItemsCallback) -> Subscription {
        self.subscribe_items(Filter::default(), notify)
    }
}

/// Handle to a live query. Dropping it unregisters the watcher at the
/// source, releasing its resources.
pub struct Subscription(Option<Box<dyn FnOnce() + Send>>);

impl Subscription {
    pub fn new(on_cancel: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(on_cancel)))
    }

    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(on_cancel) = self.0.take() {
            on_cancel();
        }
    }
}
