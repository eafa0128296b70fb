//! Timestamped sibling backups taken before a file is overwritten.
//!
//! Failure here never aborts an install: the orchestrator logs the warning
//! and proceeds, so a broken backup can never block the user's installation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::error::RoboError;
use crate::outcome::Outcome;

/// Copy `path` to a sibling named `<stem>_backup_<YYYYmmdd_HHMMSS><.ext>`.
///
/// Refuses to overwrite an existing backup of the same generated name. The
/// timestamp has one-second granularity, so only rapid repeated runs within
/// the same second can collide; this is a known limitation.
pub fn backup(path: &Path) -> Outcome<PathBuf> {
    if !path.exists() {
        return Outcome::fail(format!("Nothing to back up: {} does not exist", path.display()));
    }

    let backup_path = backup_path_for(path, &Local::now().format("%Y%m%d_%H%M%S").to_string());
    let backup_name = backup_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| backup_path.display().to_string());

    if backup_path.exists() {
        return Outcome::fail_with(
            format!("Backup already exists: {backup_name}"),
            Some("Wait a second and run again".to_string()),
            Some(RoboError::BackupFailed {
                path: path.display().to_string(),
                reason: "a backup with the same timestamp already exists".to_string(),
            }),
        );
    }

    debug!("creating backup {}", backup_path.display());
    match fs::copy(path, &backup_path) {
        Ok(_) => Outcome::ok_with(
            format!("Backup created: {backup_name}"),
            backup_path,
            path.display().to_string(),
        ),
        Err(e) => Outcome::fail_with(
            "Could not create backup".to_string(),
            Some(e.to_string()),
            Some(RoboError::BackupFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        ),
    }
}

fn backup_path_for(path: &Path, timestamp: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{stem}_backup_{timestamp}{ext}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_backup_name_keeps_stem_and_extension() {
        let generated = backup_path_for(
            Path::new("/games/wot/modpack/robo_configv3.inf"),
            "20260806_120000",
        );
        assert_eq!(
            generated,
            Path::new("/games/wot/modpack/robo_configv3_backup_20260806_120000.inf")
        );
    }

    #[test]
    fn test_backup_copies_content_byte_for_byte() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("config.inf");
        fs::write(&original, b"[Setup]\nkey=value\n").unwrap();

        let outcome = backup(&original);
        assert!(outcome.succeeded(), "{}", outcome.message());

        let backup_path = outcome.payload().unwrap();
        assert_eq!(
            fs::read(backup_path).unwrap(),
            fs::read(&original).unwrap()
        );
        assert!(original.exists(), "original must stay in place");
    }

    #[test]
    fn test_backup_of_missing_file_is_a_soft_failure() {
        let temp = TempDir::new().unwrap();
        let outcome = backup(&temp.path().join("missing.inf"));
        assert!(!outcome.succeeded());
        assert!(outcome.message().contains("Nothing to back up"));
    }

    #[test]
    fn test_backup_refuses_to_overwrite_same_name() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("config.inf");
        fs::write(&original, b"current").unwrap();

        // occupy the name the next backup in this second would get
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let occupied = backup_path_for(&original, &timestamp);
        fs::write(&occupied, b"older backup").unwrap();

        let outcome = backup(&original);
        if !outcome.succeeded() {
            // collided within the same second, as staged
            assert!(outcome.message().contains("already exists"));
            assert_eq!(fs::read(&occupied).unwrap(), b"older backup");
        }
        // if the clock ticked between the two timestamps the backup simply
        // succeeded under a fresh name, which is also correct
    }
}
