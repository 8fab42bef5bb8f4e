use std::{collections::BTreeMap, sync::Arc};

use itertools::Itertools;
use parking_lot::Mutex;

use crate::{
    actor::{Act, Actor, ActorHandle, Capacity},
    error::Error,
    item::{Item, ItemDraft, ItemId},
    store::{Filter, GenresCallback, ItemsCallback, QuerySource, Subscription},
    util::Sequence,
};

pub type StoreHandle = Arc<MemoryStore>;

/// In-memory reference implementation of [`QuerySource`]. Mutations update
/// the tables and hand a fresh snapshot to the notifier worker, which
/// re-evaluates every live query and pushes results to its subscribers.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    notifier: ActorHandle<NotifierMsg>,
}

impl MemoryStore {
    pub fn new() -> StoreHandle {
        let notifier = Notifier::spawn(Capacity::Unbounded, |_| Notifier::default());
        Arc::new(Self {
            tables: Mutex::new(Tables::new()),
            notifier,
        })
    }

    /// Snapshot of all items, name-ascending.
    pub fn snapshot(&self) -> Vec<Item> {
        self.tables.lock().snapshot()
    }

    fn subscribe(&self, watcher: Watcher) -> Subscription {
        let id = self.tables.lock().watcher_ids.advance();
        let _ = self.notifier.send(NotifierMsg::Subscribe(id, watcher));
        let sender = self.notifier.sender();
        Subscription::new(move || {
            let _ = sender.send(NotifierMsg::Unsubscribe(id));
        })
    }

    fn publish(&self, tables: &Tables) {
        let _ = self.notifier.send(NotifierMsg::Changed(tables.snapshot()));
    }
}

impl QuerySource for MemoryStore {
    fn subscribe_items(&self, filter: Filter, notify: ItemsCallback) -> Subscription {
        self.subscribe(Watcher::Items { filter, notify })
    }

    fn subscribe_genres(&self, notify: GenresCallback) -> Subscription {
        self.subscribe(Watcher::Genres { notify })
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>, Error> {
        Ok(self.tables.lock().items.get(&id).cloned())
    }

    fn insert(&self, draft: ItemDraft) -> Result<ItemId, Error> {
        let mut tables = self.tables.lock();
        let id = ItemId(tables.item_ids.advance());
        tables.items.insert(id, Item::from_draft(id, draft));
        self.publish(&tables);
        Ok(id)
    }

    fn update(&self, item: Item) -> Result<(), Error> {
        let mut tables = self.tables.lock();
        if !tables.items.contains_key(&item.id) {
            return Err(Error::ItemNotFound(item.id));
        }
        tables.items.insert(item.id, item);
        self.publish(&tables);
        Ok(())
    }

    fn delete(&self, id: ItemId) -> Result<(), Error> {
        let mut tables = self.tables.lock();
        if tables.items.remove(&id).is_none() {
            return Err(Error::ItemNotFound(id));
        }
        self.publish(&tables);
        Ok(())
    }
}

struct Tables {
    item_ids: Sequence<u32>,
    watcher_ids: Sequence<u64>,
    items: BTreeMap<ItemId, Item>,
}

impl Tables {
    fn new() -> Self {
        Self {
            item_ids: Sequence::new(1),
            watcher_ids: Sequence::new(1),
            items: BTreeMap::new(),
        }
    }

    fn snapshot(&self) -> Vec<Item> {
        self.items
            .values()
            .cloned()
            .sorted_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)))
            .collect()
    }
}

enum NotifierMsg {
    Changed(Vec<Item>),
    Subscribe(u64, Watcher),
    Unsubscribe(u64),
}

enum Watcher {
    Items {
        filter: Filter,
        notify: ItemsCallback,
    },
    Genres {
        notify: GenresCallback,
    },
}

/// Owns the watcher registry and the latest snapshot, off the mutating
/// thread. New subscribers get the current value replayed immediately.
#[derive(Default)]
struct Notifier {
    items: Vec<Item>,
    watchers: Vec<(u64, Watcher)>,
}

impl Notifier {
    fn evaluate(watcher: &Watcher, items: &[Item]) {
        match watcher {
            Watcher::Items { filter, notify } => {
                let matched = items
                    .iter()
                    .filter(|item| filter.matches(item))
                    .cloned()
                    .collect();
                notify(Ok(matched));
            }
            Watcher::Genres { notify } => {
                let genres = items
                    .iter()
                    .filter_map(|item| item.genre.as_deref())
                    .filter(|genre| !genre.is_empty())
                    .map(str::to_owned)
                    .sorted()
                    .dedup()
                    .collect();
                notify(Ok(genres));
            }
        }
    }
}

impl Actor for Notifier {
    type Message = NotifierMsg;
    type Error = Error;

    fn handle(&mut self, msg: NotifierMsg) -> Result<Act, Error> {
        match msg {
            NotifierMsg::Changed(items) => {
                self.items = items;
                for (_, watcher) in &self.watchers {
                    Self::evaluate(watcher, &self.items);
                }
            }
            NotifierMsg::Subscribe(id, watcher) => {
                Self::evaluate(&watcher, &self.items);
                self.watchers.push((id, watcher));
            }
            NotifierMsg::Unsubscribe(id) => {
                self.watchers.retain(|(watcher_id, _)| *watcher_id != id);
            }
        }
        Ok(Act::Continue)
    }
}
