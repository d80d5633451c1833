use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;

use crate::{
    core::{LocationCache, eviction},
    prelude::*,
    tables::build_locations_table,
};

#[derive(Parser)]
pub struct ResourceArgs {
    /// Directory to keep the downloaded solar resource files in.
    #[clap(long = "resource-dir", env = "RESOURCE_DIR", default_value = "solar_data")]
    pub directory: PathBuf,

    /// Maximum number of resource files to keep, the oldest ones get removed first.
    #[clap(long = "max-resource-files", env = "MAX_RESOURCE_FILES", default_value = "50")]
    pub max_files: NonZeroUsize,
}

#[derive(Parser)]
pub struct LocationsArgs {
    #[clap(flatten)]
    resources: ResourceArgs,
}

impl LocationsArgs {
    pub fn run(&self) -> Result {
        let cache = LocationCache::scan(&self.resources.directory)?;
        info!(n_locations = cache.len(), "scanned");
        println!("{}", build_locations_table(&cache, None));
        Ok(())
    }
}

#[derive(Parser)]
pub struct EvictArgs {
    #[clap(flatten)]
    resources: ResourceArgs,
}

impl EvictArgs {
    pub fn run(&self) -> Result {
        let n_removed =
            eviction::evict(&self.resources.directory, self.resources.max_files.get(), None)?;
        info!(n_removed, "evicted");
        Ok(())
    }
}
