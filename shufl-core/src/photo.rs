use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::Mutex;

use crate::error::Error;

pub type PhotoHandle = Arc<FsPhotos>;

/// Photo storage as consumed by the entry flow: a picked file is staged
/// first, then moved to durable storage when the item is saved.
pub trait PhotoStore: Send + Sync {
    /// Copy a user-picked file into the staging area, replacing any
    /// previously staged selection.
    fn cache_selection(&self, source: &Path) -> Result<PathBuf, Error>;

    /// Move the staged file into durable storage and return its new
    /// location; `None` when nothing is staged.
    fn commit_to_storage(&self) -> Result<Option<PathBuf>, Error>;

    /// Drop the staged selection without committing it.
    fn discard_selection(&self);
}

/// Directory-backed [`PhotoStore`] with `staging/` and `photos/` under a
/// common base, so commits are a rename on the same filesystem.
pub struct FsPhotos {
    staging: PathBuf,
    storage: PathBuf,
    staged: Mutex<Option<PathBuf>>,
}

impl FsPhotos {
    pub fn new(base: &Path) -> Result<PhotoHandle, Error> {
        let staging = base.join("staging");
        let storage = base.join("photos");
        mkdir_if_not_exists(&staging)?;
        mkdir_if_not_exists(&storage)?;
        Ok(Arc::new(Self {
            staging,
            storage,
            staged: Mutex::new(None),
        }))
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage
    }
}

impl PhotoStore for FsPhotos {
    fn cache_selection(&self, source: &Path) -> Result<PathBuf, Error> {
        let file_name = source
            .file_name()
            .ok_or_else(|| Error::InvalidPhoto(format!("no file name in {:?}", source)))?;
        let staged_path = self.staging.join(file_name);
        fs::copy(source, &staged_path)?;
        log::debug!("staged photo: {:?}", staged_path);

        let mut staged = self.staged.lock();
        if let Some(previous) = staged.replace(staged_path.clone()) {
            if previous != staged_path {
                let _ = fs::remove_file(previous);
            }
        }
        Ok(staged_path)
    }

    fn commit_to_storage(&self) -> Result<Option<PathBuf>, Error> {
        let Some(staged_path) = self.staged.lock().take() else {
            return Ok(None);
        };
        let file_name = staged_path
            .file_name()
            .ok_or_else(|| Error::InvalidPhoto(format!("no file name in {:?}", staged_path)))?;
        let target = self.storage.join(file_name);
        fs::rename(&staged_path, &target)?;
        log::debug!("committed photo: {:?}", target);
        Ok(Some(target))
    }

    fn discard_selection(&self) {
        if let Some(staged_path) = self.staged.lock().take() {
            log::debug!("discarding staged photo: {:?}", staged_path);
            let _ = fs::remove_file(staged_path);
        }
    }
}

pub fn mkdir_if_not_exists(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
