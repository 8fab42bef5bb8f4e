use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Store-assigned identity of an [`Item`].
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A library entry. Immutable value, a new version replaces the old one on
/// edit. `min_players`/`max_players` carry no ordering invariant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub photo: Option<PathBuf>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub min_players: Option<u32>,
    #[serde(default)]
    pub max_players: Option<u32>,
}

impl Item {
    pub fn from_draft(id: ItemId, draft: ItemDraft) -> Self {
        Self {
            id,
            name: draft.name,
            photo: draft.photo,
            description: draft.description,
            genre: draft.genre,
            min_players: draft.min_players,
            max_players: draft.max_players,
        }
    }
}

/// An [`Item`] before the store has assigned it an identity.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    #[serde(default)]
    pub photo: Option<PathBuf>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub min_players: Option<u32>,
    #[serde(default)]
    pub max_players: Option<u32>,
}

impl From<Item> for ItemDraft {
    fn from(item: Item) -> Self {
        Self {
            name: item.name,
            photo: item.photo,
            description: item.description,
            genre: item.genre,
            min_players: item.min_players,
            max_players: item.max_players,
        }
    }
}
