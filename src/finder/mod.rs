//! Tiered location resolution for the Aslain's Modpack directory.
//!
//! Three strategies run in order, stopping at the first validated hit:
//! known candidate paths, a bounded-depth scan of every fixed volume, and a
//! manual prompt. A candidate becomes a [`ValidatedLocation`] only when the
//! directory exists and contains the configured installer file.

pub mod scan;
pub mod volumes;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::RoboError;
use crate::outcome::Outcome;
use crate::prompt::Prompt;

/// A directory proven to contain a real modpack installation, plus metadata
/// about its installer file. Existence of the installer is guaranteed by
/// construction: only [`validate`] produces values of this type.
#[derive(Debug, Clone)]
pub struct ValidatedLocation {
    /// The modpack directory itself.
    pub path: PathBuf,
    /// The installer executable inside it.
    pub installer_path: PathBuf,
    /// Last write time of the installer, when the filesystem reports one.
    pub last_modified: Option<DateTime<Local>>,
    /// Size of the installer in bytes.
    pub installer_size: u64,
}

/// Check a single candidate directory. `None` means "no match here", which
/// is expected and frequent, not an error. Idempotent for an unchanged path.
pub fn validate(dir: &Path, installer_name: &str) -> Option<ValidatedLocation> {
    if !dir.is_dir() {
        return None;
    }

    let installer_path = dir.join(installer_name);
    let metadata = match fs::metadata(&installer_path) {
        Ok(m) if m.is_file() => m,
        _ => {
            debug!("installer missing: {}", installer_path.display());
            return None;
        }
    };

    Some(ValidatedLocation {
        path: dir.to_path_buf(),
        installer_path,
        last_modified: metadata.modified().ok().map(DateTime::<Local>::from),
        installer_size: metadata.len(),
    })
}

pub struct AslainFinder<'a> {
    config: &'a AppConfig,
}

impl<'a> AslainFinder<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        AslainFinder { config }
    }

    /// Resolve the modpack directory through the tiered strategies.
    pub fn find(&self, prompt: &dyn Prompt) -> Outcome<ValidatedLocation> {
        debug!("checking known locations");
        if let Some(location) = self.check_known_locations() {
            let path = location.path.display().to_string();
            return Outcome::ok_with("Modpack folder found", location, path);
        }

        info!("deep scanning fixed drives, this can take a while");
        if let Some(location) = self.deep_scan() {
            let path = location.path.display().to_string();
            return Outcome::ok_with("Modpack folder found", location, path);
        }

        warn!("modpack folder not found automatically");
        if let Some(manual) = prompt.prompt_text("Enter the Aslain_Modpack path manually") {
            let dir = PathBuf::from(&manual);
            return match validate(&dir, &self.config.installer_name) {
                Some(location) => Outcome::ok_with("Manual path validated", location, manual),
                None => Outcome::fail_with(
                    format!("No Aslain's Modpack installation at {manual}"),
                    Some(format!(
                        "The folder must exist and contain {}",
                        self.config.installer_name
                    )),
                    Some(RoboError::LocationNotFound),
                ),
            };
        }

        Outcome::fail_with(
            "Could not locate the Aslain's Modpack folder",
            Some("Make sure World of Tanks EU and Aslain's Modpack are both installed".to_string()),
            Some(RoboError::LocationNotFound),
        )
    }

    /// Tier 1: configured candidate paths plus the platform program
    /// directories joined with the game and modpack folder names.
    fn check_known_locations(&self) -> Option<ValidatedLocation> {
        let mut candidates = self.config.known_locations.clone();
        for program_dir in program_directories() {
            candidates.push(
                program_dir
                    .join(&self.config.wot_folder_name)
                    .join(&self.config.aslain_folder_name),
            );
        }

        for candidate in candidates {
            debug!("checking {}", candidate.display());
            if let Some(location) = validate(&candidate, &self.config.installer_name) {
                info!("found {}", location.path.display());
                return Some(location);
            }
        }
        None
    }

    /// Tier 2: scan each fixed volume in order, strictly sequentially. A
    /// match on an earlier volume means later volumes are never inspected.
    fn deep_scan(&self) -> Option<ValidatedLocation> {
        let roots = self
            .config
            .scan_volumes
            .clone()
            .unwrap_or_else(volumes::fixed_volumes);

        for root in roots {
            info!("scanning {}", root.display());
            if let Some(location) = self.scan_volume(&root) {
                return Some(location);
            }
        }
        None
    }

    fn scan_volume(&self, root: &Path) -> Option<ValidatedLocation> {
        for wot_dir in scan::matching_directories(
            root,
            &self.config.wot_folder_name,
            self.config.scan_depth,
        ) {
            let candidate = wot_dir.join(&self.config.aslain_folder_name);
            debug!("checking {}", candidate.display());
            if let Some(location) = validate(&candidate, &self.config.installer_name) {
                info!("found {}", location.path.display());
                return Some(location);
            }
        }
        None
    }
}

fn program_directories() -> Vec<PathBuf> {
    let mut program_dirs = Vec::new();

    #[cfg(windows)]
    for var in ["ProgramFiles(x86)", "ProgramFiles"] {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                program_dirs.push(PathBuf::from(value));
            }
        }
    }

    // Wine/Proton installs commonly live under the user's Games directory
    if let Some(home) = dirs::home_dir() {
        program_dirs.push(home.join("Games"));
    }

    program_dirs
}
