use std::{
    collections::HashMap,
    fs,
    io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use itertools::Itertools;

use crate::{
    core::{GeoPoint, resource_file},
    prelude::*,
};

/// Resource file that has already been downloaded for a point.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry {
    pub point: GeoPoint,
    pub path: PathBuf,
    pub modified_at: DateTime<Local>,
}

/// Index of the resource directory keyed by point.
#[must_use]
#[derive(Default)]
pub struct LocationCache {
    entries: HashMap<GeoPoint, CacheEntry>,
}

impl LocationCache {
    /// Scan the directory for resource files.
    ///
    /// A missing directory is simply an empty cache. Files that do not follow the naming
    /// contract are skipped.
    #[instrument(skip_all, fields(directory = %directory.display()))]
    pub fn scan(directory: &Path) -> Result<Self> {
        let read_dir = match fs::read_dir(directory) {
            Ok(read_dir) => read_dir,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!("the resource directory does not exist yet");
                return Ok(Self::default());
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to read the resource directory `{}`", directory.display())
                });
            }
        };

        let mut entries = HashMap::<GeoPoint, CacheEntry>::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.context("failed to list the resource directory")?;
            let Some(point) = dir_entry.file_name().to_str().and_then(resource_file::parse_file_name)
            else {
                continue;
            };
            let modified_at = match dir_entry.metadata().and_then(|metadata| metadata.modified()) {
                Ok(modified_at) => DateTime::<Local>::from(modified_at),
                Err(error) => {
                    warn!(path = %dir_entry.path().display(), "skipping unreadable file: {error:#}");
                    continue;
                }
            };
            let entry = CacheEntry { point, path: dir_entry.path(), modified_at };
            match entries.get(&point) {
                Some(existing) if existing.modified_at >= entry.modified_at => {}
                _ => {
                    entries.insert(point, entry);
                }
            }
        }

        debug!(n_entries = entries.len(), "scanned");
        Ok(Self { entries })
    }

    pub fn lookup(&self, point: &GeoPoint) -> Option<&CacheEntry> {
        self.entries.get(point)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by point.
    pub fn entries(&self) -> Vec<&CacheEntry> {
        self.entries.values().sorted_by_key(|entry| entry.point).collect()
    }
}
