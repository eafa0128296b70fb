//! Search configuration: where to look, what marks a real installation, and
//! where the configuration artifact comes from.
//!
//! Defaults match a standard Aslain's Modpack setup for World of Tanks EU.
//! Every field can be overridden from a YAML file passed with `--config` or
//! the `ROBOASLAIN_CONFIG` environment variable; the configuration is
//! read-only for the lifetime of a run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoboError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// GitHub user hosting the configuration artifact.
    pub github_user: String,
    /// GitHub repository hosting the configuration artifact.
    pub github_repo: String,
    /// Name of the configuration file, both remotely and inside the modpack
    /// directory.
    pub config_file_name: String,
    /// Full download URL for the configuration artifact. When unset, the
    /// GitHub raw URL is derived from the user, repository, and file name.
    pub config_download_url: Option<String>,
    /// Marker file whose presence confirms a directory is a real modpack
    /// installation. Also the executable that gets launched.
    pub installer_name: String,
    /// Name of the game directory the deep scan looks for.
    pub wot_folder_name: String,
    /// Name of the modpack directory inside the game directory.
    pub aslain_folder_name: String,
    /// Back up an existing configuration before overwriting it.
    pub create_backup: bool,
    /// How many directory levels below each volume root the deep scan
    /// descends. Directories at exactly this depth are still inspected.
    pub scan_depth: usize,
    /// Direct download URL for the modpack installer, if known. When unset,
    /// the self-update flow falls back to the vendor's download page.
    pub aslain_download_url: Option<String>,
    /// Fixed candidate paths checked before any disk scan, in order.
    pub known_locations: Vec<PathBuf>,
    /// Roots the deep scan walks, in order. When unset, the non-removable
    /// volumes of the machine are enumerated at scan time.
    pub scan_volumes: Option<Vec<PathBuf>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            github_user: "Robocnop".to_string(),
            github_repo: "config-Wot-Alsain-mod".to_string(),
            config_file_name: "robo_configv3.inf".to_string(),
            config_download_url: None,
            installer_name: "Aslains_WoT_Modpack_Installer.exe".to_string(),
            wot_folder_name: "World_of_Tanks_EU".to_string(),
            aslain_folder_name: "Aslain_Modpack".to_string(),
            create_backup: true,
            scan_depth: 5,
            aslain_download_url: None,
            known_locations: vec![
                PathBuf::from(r"C:\Games\World_of_Tanks_EU\Aslain_Modpack"),
                PathBuf::from(r"D:\Games\World_of_Tanks_EU\Aslain_Modpack"),
                PathBuf::from(r"E:\Games\World_of_Tanks_EU\Aslain_Modpack"),
            ],
            scan_volumes: None,
        }
    }
}

impl AppConfig {
    /// Load the configuration: defaults when `path` is `None`, otherwise the
    /// given YAML file, which must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(AppConfig::default());
        };

        let content =
            std::fs::read_to_string(path).map_err(|e| RoboError::ConfigReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        serde_yaml::from_str(&content).map_err(|e| RoboError::ConfigInvalid {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// URL of the raw configuration artifact on GitHub.
    pub fn raw_config_url(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/main/{}",
            self.github_user, self.github_repo, self.config_file_name
        )
    }

    /// URL the configuration is actually downloaded from: the configured
    /// override, or the GitHub raw URL.
    pub fn config_url(&self) -> String {
        self.config_download_url
            .clone()
            .unwrap_or_else(|| self.raw_config_url())
    }
}
