//! Command handlers for the `gg` binary.

pub mod completions;
pub mod fetch;
pub mod list;
pub mod vote;

use anyhow::Result;
use giggle_core::collection::JokeCollection;
use giggle_core::config::{self, ProjectConfig};
use giggle_core::store::FileStore;

/// Load config and hydrate the collection from the resolved data directory.
pub fn open_collection() -> Result<(ProjectConfig, JokeCollection<FileStore>)> {
    let config = config::load_config()?;
    let store = FileStore::new(config::resolve_data_dir(&config));
    let collection = JokeCollection::hydrate(store);
    Ok((config, collection))
}
