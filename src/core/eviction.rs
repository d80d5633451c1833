use std::{
    fs,
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use itertools::Itertools;

use crate::prelude::*;

/// Remove the oldest files until at most `max_entries` remain in the directory.
///
/// Files are ordered by modification time, ties broken by path. The `keep` file, if any, is never
/// a candidate and counts towards the retained ones.
///
/// Returns the number of removed files.
#[instrument(skip_all, fields(directory = %directory.display(), max_entries = max_entries))]
pub fn evict(directory: &Path, max_entries: usize, keep: Option<&Path>) -> Result<usize> {
    let files = list_files(directory)?;
    if files.len() <= max_entries {
        debug!(n_files = files.len(), "nothing to evict");
        return Ok(0);
    }

    let n_excess = files.len() - max_entries;
    info!(n_files = files.len(), n_excess, "location limit exceeded, removing the oldest…");
    let oldest = files
        .into_iter()
        .filter(|(path, _)| Some(path.as_path()) != keep)
        .sorted_unstable_by_key(|(path, modified_at)| (*modified_at, path.clone()))
        .take(n_excess)
        .map(|(path, _)| path);
    Ok(remove_all(oldest))
}

/// A file that fails to be removed is logged and skipped, the rest is still processed.
fn remove_all(paths: impl IntoIterator<Item = PathBuf>) -> usize {
    let mut n_removed = 0;
    for path in paths {
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "removed");
                n_removed += 1;
            }
            Err(error) => {
                warn!(path = %path.display(), "failed to remove: {error:#}");
            }
        }
    }
    n_removed
}

fn list_files(directory: &Path) -> Result<Vec<(PathBuf, SystemTime)>> {
    let read_dir = match fs::read_dir(directory) {
        Ok(read_dir) => read_dir,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => {
            return Err(error).with_context(|| {
                format!("failed to read the resource directory `{}`", directory.display())
            });
        }
    };
    let mut files = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = dir_entry.context("failed to list the resource directory")?;
        match dir_entry.metadata() {
            Ok(metadata) if metadata.is_file() => {
                let modified_at = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                files.push((dir_entry.path(), modified_at));
            }
            Ok(_) => {}
            Err(error) => {
                warn!(path = %dir_entry.path().display(), "skipping unreadable entry: {error:#}");
            }
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::{fs::File, time::Duration};

    use super::*;

    fn touch(directory: &Path, name: &str, age: Duration) -> Result<PathBuf> {
        let path = directory.join(name);
        fs::write(&path, name)?;
        File::options().write(true).open(&path)?.set_modified(SystemTime::now() - age)?;
        Ok(path)
    }

    #[test]
    fn test_keeps_most_recent() -> Result {
        let directory = tempfile::tempdir()?;
        let paths = (0..5_u64)
            .map(|age| touch(directory.path(), &format!("{age}.csv"), Duration::from_secs(age * 60)))
            .collect::<Result<Vec<_>>>()?;

        assert_eq!(evict(directory.path(), 3, None)?, 2);

        let remaining = list_files(directory.path())?
            .into_iter()
            .map(|(path, _)| path)
            .sorted()
            .collect_vec();
        assert_eq!(remaining, paths[..3]);
        Ok(())
    }

    #[test]
    fn test_under_limit_is_noop() -> Result {
        let directory = tempfile::tempdir()?;
        touch(directory.path(), "a.csv", Duration::ZERO)?;
        touch(directory.path(), "b.csv", Duration::ZERO)?;
        assert_eq!(evict(directory.path(), 2, None)?, 0);
        assert_eq!(list_files(directory.path())?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_ignores_subdirectories() -> Result {
        let directory = tempfile::tempdir()?;
        fs::create_dir(directory.path().join("nested"))?;
        touch(directory.path(), "old.csv", Duration::from_secs(600))?;
        let new = touch(directory.path(), "new.csv", Duration::ZERO)?;

        assert_eq!(evict(directory.path(), 1, None)?, 1);
        assert!(directory.path().join("nested").is_dir());
        let remaining = list_files(directory.path())?.into_iter().map(|(path, _)| path).collect_vec();
        assert_eq!(remaining, [new]);
        Ok(())
    }

    #[test]
    fn test_missing_directory() -> Result {
        let directory = tempfile::tempdir()?;
        assert_eq!(evict(&directory.path().join("missing"), 1, None)?, 0);
        Ok(())
    }

    #[test]
    fn test_keeps_the_file_in_use() -> Result {
        let directory = tempfile::tempdir()?;
        let in_use = touch(directory.path(), "in-use.csv", Duration::from_secs(3600))?;
        let older = touch(directory.path(), "older.csv", Duration::from_secs(600))?;
        let newest = touch(directory.path(), "newest.csv", Duration::ZERO)?;

        assert_eq!(evict(directory.path(), 2, Some(&in_use))?, 1);
        assert!(in_use.is_file());
        assert!(!older.exists());
        assert!(newest.is_file());
        Ok(())
    }

    #[test]
    fn test_remove_all_skips_failures() -> Result {
        let directory = tempfile::tempdir()?;
        let paths = [
            directory.path().join("already-gone.csv"),
            touch(directory.path(), "a.csv", Duration::ZERO)?,
            touch(directory.path(), "b.csv", Duration::ZERO)?,
        ];

        assert_eq!(remove_all(paths.clone()), 2);
        assert!(paths.iter().all(|path| !path.exists()));
        Ok(())
    }

    #[test]
    fn test_not_a_directory() -> Result {
        let directory = tempfile::tempdir()?;
        let file = touch(directory.path(), "a.csv", Duration::ZERO)?;
        assert!(evict(&file, 1, None).is_err());
        Ok(())
    }
}
