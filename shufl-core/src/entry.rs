use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    item::{Item, ItemDraft, ItemId},
    photo::PhotoStore,
    store::QuerySource,
};

/// Form state for adding or editing an item, holding fields as the raw
/// strings the input widgets produce. The only validated constraint is a
/// non-blank name; an inverted player range is stored as entered.
#[derive(Clone, Debug, Default)]
pub struct EntryForm {
    pub name: String,
    pub description: String,
    pub genre: String,
    pub min_players: String,
    pub max_players: String,
    photo: Option<PathBuf>,
}

impl EntryForm {
    pub fn from_item(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            genre: item.genre.clone().unwrap_or_default(),
            min_players: item.min_players.map(|n| n.to_string()).unwrap_or_default(),
            max_players: item.max_players.map(|n| n.to_string()).unwrap_or_default(),
            photo: item.photo.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }

    pub fn photo(&self) -> Option<&Path> {
        self.photo.as_deref()
    }

    /// Stage a picked photo file; it becomes durable on save.
    pub fn attach_photo(&mut self, photos: &dyn PhotoStore, source: &Path) -> Result<(), Error> {
        self.photo = Some(photos.cache_selection(source)?);
        Ok(())
    }

    pub fn save(
        &self,
        source: &dyn QuerySource,
        photos: &dyn PhotoStore,
    ) -> Result<ItemId, Error> {
        if !self.is_valid() {
            return Err(Error::InvalidName);
        }
        let photo = photos.commit_to_storage()?.or_else(|| self.photo.clone());
        source.insert(self.draft(photo))
    }

    pub fn save_edit(
        &self,
        id: ItemId,
        source: &dyn QuerySource,
        photos: &dyn PhotoStore,
    ) -> Result<ItemId, Error> {
        if !self.is_valid() {
            return Err(Error::InvalidName);
        }
        let photo = photos.commit_to_storage()?.or_else(|| self.photo.clone());
        source.update(Item::from_draft(id, self.draft(photo)))?;
        Ok(id)
    }

    fn draft(&self, photo: Option<PathBuf>) -> ItemDraft {
        ItemDraft {
            name: self.name.clone(),
            photo,
            description: non_blank(&self.description),
            genre: non_blank(&self.genre),
            min_players: self.min_players.trim().parse().ok(),
            max_players: self.max_players.trim().parse().ok(),
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::{photo::FsPhotos, store::MemoryStore};

    use super::*;

    #[test]
    fn a_blank_name_fails_validation_and_save() {
        let store = MemoryStore::new();
        let base = tempfile::tempdir().unwrap();
        let photos = FsPhotos::new(base.path()).unwrap();

        let form = EntryForm {
            name: "   ".into(),
            ..EntryForm::default()
        };
        assert!(!form.is_valid());
        assert!(matches!(
            form.save(store.as_ref(), photos.as_ref()),
            Err(Error::InvalidName)
        ));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn numeric_fields_normalize_to_none_when_unparsable() {
        let store = MemoryStore::new();
        let base = tempfile::tempdir().unwrap();
        let photos = FsPhotos::new(base.path()).unwrap();

        let form = EntryForm {
            name: "Carcassonne".into(),
            genre: "  ".into(),
            min_players: " 2 ".into(),
            max_players: "lots".into(),
            ..EntryForm::default()
        };
        let id = form.save(store.as_ref(), photos.as_ref()).unwrap();

        let saved = store.get(id).unwrap().expect("saved item");
        assert_eq!(saved.name, "Carcassonne");
        assert_eq!(saved.genre, None);
        assert_eq!(saved.min_players, Some(2));
        assert_eq!(saved.max_players, None);
    }

    #[test]
    fn an_inverted_player_range_is_saved_as_entered() {
        let store = MemoryStore::new();
        let base = tempfile::tempdir().unwrap();
        let photos = FsPhotos::new(base.path()).unwrap();

        let form = EntryForm {
            name: "Oddball".into(),
            min_players: "6".into(),
            max_players: "2".into(),
            ..EntryForm::default()
        };
        let id = form.save(store.as_ref(), photos.as_ref()).unwrap();

        let saved = store.get(id).unwrap().expect("saved item");
        assert_eq!(saved.min_players, Some(6));
        assert_eq!(saved.max_players, Some(2));
    }

    #[test]
    fn saving_commits_the_staged_photo() {
        let store = MemoryStore::new();
        let base = tempfile::tempdir().unwrap();
        let photos = FsPhotos::new(base.path()).unwrap();
        let picked = base.path().join("box-art.jpg");
        fs::write(&picked, "jpeg-bytes").unwrap();

        let mut form = EntryForm {
            name: "Wingspan".into(),
            ..EntryForm::default()
        };
        form.attach_photo(photos.as_ref(), &picked).unwrap();
        let id = form.save(store.as_ref(), photos.as_ref()).unwrap();

        let saved = store.get(id).unwrap().expect("saved item");
        let photo = saved.photo.expect("durable photo");
        assert!(photo.starts_with(photos.storage_dir()));
        assert!(photo.exists());
    }

    #[test]
    fn editing_keeps_the_existing_photo_when_none_is_staged() {
        let store = MemoryStore::new();
        let base = tempfile::tempdir().unwrap();
        let photos = FsPhotos::new(base.path()).unwrap();
        let picked = base.path().join("box-art.jpg");
        fs::write(&picked, "jpeg-bytes").unwrap();

        let mut form = EntryForm {
            name: "Wingspan".into(),
            ..EntryForm::default()
        };
        form.attach_photo(photos.as_ref(), &picked).unwrap();
        let id = form.save(store.as_ref(), photos.as_ref()).unwrap();
        let saved = store.get(id).unwrap().expect("saved item");

        let mut edit = EntryForm::from_item(&saved);
        edit.name = "Wingspan: Europe".into();
        let same_id = edit.save_edit(id, store.as_ref(), photos.as_ref()).unwrap();
        assert_eq!(same_id, id);

        let updated = store.get(id).unwrap().expect("updated item");
        assert_eq!(updated.name, "Wingspan: Europe");
        assert_eq!(updated.photo, saved.photo);
    }

    #[test]
    fn from_item_round_trips_the_fields_as_text() {
        let item = Item {
            id: ItemId(9),
            name: "Azul".into(),
            photo: None,
            description: Some("tile drafting".into()),
            genre: Some("Abstract".into()),
            min_players: Some(2),
            max_players: Some(4),
        };
        let form = EntryForm::from_item(&item);
        assert_eq!(form.name, "Azul");
        assert_eq!(form.description, "tile drafting");
        assert_eq!(form.genre, "Abstract");
        assert_eq!(form.min_players, "2");
        assert_eq!(form.max_players, "4");
    }
}
