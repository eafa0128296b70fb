//! Bounded-depth, error-tolerant directory scan.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Lazily yields directories under `root` whose name equals `dir_name`,
/// descending at most `max_depth` levels below `root`. Directories at exactly
/// `max_depth` are still inspected; anything deeper is not. Unreadable
/// entries and subtrees are skipped, never surfaced as errors.
pub fn matching_directories(
    root: &Path,
    dir_name: &str,
    max_depth: usize,
) -> impl Iterator<Item = PathBuf> {
    let wanted: OsString = OsString::from(dir_name);
    WalkDir::new(root)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .filter(move |entry| entry.file_name() == wanted.as_os_str())
        .map(walkdir::DirEntry::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn mkdirs(root: &Path, rel: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_finds_directory_by_name() {
        let temp = TempDir::new().unwrap();
        let target = mkdirs(temp.path(), "games/World_of_Tanks_EU");
        mkdirs(temp.path(), "games/other");

        let found: Vec<_> =
            matching_directories(temp.path(), "World_of_Tanks_EU", 5).collect();
        assert_eq!(found, vec![target]);
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let temp = TempDir::new().unwrap();
        // "a/b/wot" sits at depth 3 below the root
        let at_limit = mkdirs(temp.path(), "a/b/wot");

        let found: Vec<_> = matching_directories(temp.path(), "wot", 3).collect();
        assert_eq!(found, vec![at_limit]);
    }

    #[test]
    fn test_never_descends_past_the_limit() {
        let temp = TempDir::new().unwrap();
        mkdirs(temp.path(), "a/b/c/wot"); // depth 4

        let found: Vec<_> = matching_directories(temp.path(), "wot", 3).collect();
        assert!(found.is_empty());
    }

    #[test]
    fn test_matches_files_are_ignored() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("wot"), b"not a directory").unwrap();

        let found: Vec<_> = matching_directories(temp.path(), "wot", 2).collect();
        assert!(found.is_empty());
    }

    #[test]
    fn test_nonexistent_root_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("missing");

        let found: Vec<_> = matching_directories(&gone, "wot", 3).collect();
        assert!(found.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_inaccessible_subtree_is_skipped_not_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = mkdirs(temp.path(), "locked");
        mkdirs(temp.path(), "open/wot");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let found: Vec<_> = matching_directories(temp.path(), "wot", 3).collect();

        // restore so TempDir can clean up
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("open/wot"));
    }
}
