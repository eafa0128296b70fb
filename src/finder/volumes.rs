//! Enumeration of fixed local storage volumes for the deep scan.

use std::path::PathBuf;

use sysinfo::Disks;
use tracing::debug;

/// Mount points of non-removable disks, in enumeration order, deduplicated.
/// A volume that cannot be listed simply does not appear; enumeration itself
/// never fails.
pub fn fixed_volumes() -> Vec<PathBuf> {
    let disks = Disks::new_with_refreshed_list();

    let mut roots: Vec<PathBuf> = Vec::new();
    for disk in disks.list() {
        if disk.is_removable() {
            debug!("skipping removable volume {}", disk.mount_point().display());
            continue;
        }
        let mount = disk.mount_point().to_path_buf();
        if !roots.contains(&mount) {
            roots.push(mount);
        }
    }

    debug!("volumes to scan: {:?}", roots);
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_volumes_are_unique() {
        let volumes = fixed_volumes();
        let mut deduped = volumes.clone();
        deduped.dedup();
        assert_eq!(volumes, deduped);
    }
}
