//! Installing the configuration artifact into a validated modpack directory
//! and launching the installer with it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::backup;
use crate::config::AppConfig;
use crate::error::RoboError;
use crate::finder::ValidatedLocation;
use crate::launch::Launcher;
use crate::outcome::Outcome;

/// Copy the downloaded artifact over the configuration inside `location`,
/// backing up an existing file first when backups are enabled. The payload is
/// the installed target path.
///
/// The backup is advisory: if it fails, a warning is logged and the copy
/// still happens.
pub fn install_config(
    config: &AppConfig,
    artifact: &Path,
    location: &ValidatedLocation,
) -> Outcome<PathBuf> {
    let target = location.path.join(&config.config_file_name);

    if config.create_backup && target.exists() {
        let backed_up = backup::backup(&target);
        if backed_up.succeeded() {
            info!("{}", backed_up.message());
        } else {
            warn!("could not create backup: {}", backed_up.message());
        }
    }

    debug!("copying {} -> {}", artifact.display(), target.display());
    if let Err(e) = fs::copy(artifact, &target) {
        return copy_failure(&target, &e);
    }

    if !target.exists() {
        return Outcome::fail_with(
            "The configuration was not copied",
            Some(format!("Target path: {}", target.display())),
            Some(RoboError::InstallCopyFailed {
                path: target.display().to_string(),
                reason: "target missing after copy".to_string(),
            }),
        );
    }

    debug!("installed {}", target.display());
    Outcome::ok_with(
        "Configuration installed",
        target.clone(),
        format!("Location: {}", target.display()),
    )
}

/// Replace the installer binary inside `location` with `new_installer`. Used
/// by the self-update workflow; the payload is the replaced installer path.
pub fn replace_installer(
    new_installer: &Path,
    location: &ValidatedLocation,
) -> Outcome<PathBuf> {
    if location.installer_path.exists() {
        let backed_up = backup::backup(&location.installer_path);
        if backed_up.succeeded() {
            info!("{}", backed_up.message());
        } else {
            warn!("could not back up the old installer: {}", backed_up.message());
        }
    }

    debug!(
        "copying {} -> {}",
        new_installer.display(),
        location.installer_path.display()
    );
    if let Err(e) = fs::copy(new_installer, &location.installer_path) {
        return copy_failure(&location.installer_path, &e);
    }

    Outcome::ok_with(
        "Installer updated",
        location.installer_path.clone(),
        format!("Location: {}", location.path.display()),
    )
}

/// Launch the modpack installer with the just-installed configuration
/// preloaded, using its own directory as working directory.
pub fn launch_installer(
    config: &AppConfig,
    location: &ValidatedLocation,
    launcher: &dyn Launcher,
) -> Outcome<u32> {
    let args = vec![format!("/LOADINF={}", config.config_file_name)];
    launcher.start_process(&location.installer_path, &args, &location.path)
}

fn copy_failure<T>(target: &Path, e: &std::io::Error) -> Outcome<T> {
    if e.kind() == std::io::ErrorKind::PermissionDenied {
        Outcome::fail_with(
            "Insufficient permissions",
            Some("Try running the program as administrator".to_string()),
            Some(RoboError::PermissionDenied {
                path: target.display().to_string(),
            }),
        )
    } else {
        Outcome::fail_with(
            "Could not write the configuration file",
            Some(e.to_string()),
            Some(RoboError::InstallCopyFailed {
                path: target.display().to_string(),
                reason: e.to_string(),
            }),
        )
    }
}
