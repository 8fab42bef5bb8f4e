use std::{fs::File, io, path::Path};

use shufl_core::{
    error::Error,
    item::ItemDraft,
    photo::mkdir_if_not_exists,
    store::{QuerySource, StoreHandle},
};

/// Insert every draft from `path` into the store; a missing file is an
/// empty library, not an error.
pub fn seed_from_file(store: &StoreHandle, path: &Path) -> Result<usize, Error> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(err) => return Err(err.into()),
    };
    let drafts: Vec<ItemDraft> =
        serde_json::from_reader(file).map_err(|err| Error::JsonError(Box::new(err)))?;
    let count = drafts.len();
    for draft in drafts {
        store.insert(draft)?;
    }
    Ok(count)
}

/// Write the store contents back out as drafts; ids are reassigned on the
/// next load.
pub fn save_to_file(store: &StoreHandle, path: &Path) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        mkdir_if_not_exists(dir)?;
    }
    let drafts: Vec<ItemDraft> = store.snapshot().into_iter().map(ItemDraft::from).collect();
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &drafts).map_err(|err| Error::JsonError(Box::new(err)))?;
    log::info!("saved {} items to {:?}", drafts.len(), path);
    Ok(())
}
