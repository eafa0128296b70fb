//! Configuration install workflow
//!
//! resolve location → download configuration → back up and replace the
//! previous one → launch the installer with it. Each stage's outcome is
//! inspected before the next stage runs; the first failure ends the workflow
//! and its message and detail are surfaced unchanged. Completed stages are
//! never rolled back.

use std::time::Duration;

use console::style;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::download::{HttpTransfer, Transfer};
use crate::finder::AslainFinder;
use crate::install;
use crate::launch::{Launcher, SystemLauncher};
use crate::outcome::Outcome;
use crate::prompt::{ConsolePrompt, Prompt};
use crate::temp::temp_dir_base;

const CONFIG_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Run the configuration install workflow with the real capabilities.
pub fn run(config: &AppConfig) -> Outcome<()> {
    run_with(
        config,
        &HttpTransfer::new(CONFIG_DOWNLOAD_TIMEOUT),
        &ConsolePrompt,
        &SystemLauncher,
    )
}

pub(crate) fn run_with(
    config: &AppConfig,
    transfer: &dyn Transfer,
    prompt: &dyn Prompt,
    launcher: &dyn Launcher,
) -> Outcome<()> {
    info!("mode: configuration install");

    println!(
        "{} Looking for the Aslain's Modpack folder...",
        style("[1/4]").bold().dim()
    );
    let found = AslainFinder::new(config).find(prompt);
    let location = match found {
        Outcome::Success { payload, .. } => payload,
        failure => return failure.forward_failure(),
    };
    println!(
        "{} Folder found: {}",
        style("✓").green(),
        location.path.display()
    );

    println!(
        "{} Downloading the configuration...",
        style("[2/4]").bold().dim()
    );
    let url = config.config_url();
    let artifact = temp_dir_base().join(&config.config_file_name);
    let downloaded = transfer.download(&url, &artifact, None);
    if !downloaded.succeeded() {
        return downloaded.forward_failure();
    }
    println!("{} {}", style("✓").green(), downloaded.message());

    println!(
        "{} Installing the configuration...",
        style("[3/4]").bold().dim()
    );
    let installed = install::install_config(config, &artifact, &location);
    if !installed.succeeded() {
        return installed.forward_failure();
    }
    println!("{} {}", style("✓").green(), installed.message());

    // cleanup, best effort
    if let Err(e) = std::fs::remove_file(&artifact) {
        debug!("could not remove the temporary artifact: {e}");
    }

    println!(
        "{} Launching the installer...",
        style("[4/4]").bold().dim()
    );
    let launched = install::launch_installer(config, &location, launcher);
    if !launched.succeeded() {
        return launched.forward_failure();
    }
    println!("{} {}", style("✓").green(), launched.message());

    Outcome::ok_with(
        "Installation complete, the installer was launched with your configuration",
        (),
        "Follow the on-screen instructions to finish the installation".to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::fakes::FakeTransfer;
    use crate::launch::fakes::FakeLauncher;
    use crate::prompt::fakes::FakePrompt;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const INSTALLER: &str = "installer.exe";

    fn test_config(modpack: &Path, config_file_name: &str) -> AppConfig {
        AppConfig {
            installer_name: INSTALLER.to_string(),
            config_file_name: config_file_name.to_string(),
            known_locations: vec![modpack.to_path_buf()],
            scan_volumes: Some(vec![]),
            ..AppConfig::default()
        }
    }

    fn plant_modpack(temp: &TempDir) -> std::path::PathBuf {
        let modpack = temp.path().join("Aslain_Modpack");
        fs::create_dir_all(&modpack).unwrap();
        fs::write(modpack.join(INSTALLER), b"MZ").unwrap();
        modpack
    }

    #[test]
    fn test_full_workflow_installs_backs_up_and_launches() {
        let temp = TempDir::new().unwrap();
        let modpack = plant_modpack(&temp);
        let config = test_config(&modpack, "wf_full.inf");
        fs::write(modpack.join("wf_full.inf"), b"previous").unwrap();

        let transfer = FakeTransfer::serving(b"fresh configuration");
        let launcher = FakeLauncher::succeeding();
        let outcome = run_with(&config, &transfer, &FakePrompt::cancelling(), &launcher);

        assert!(outcome.succeeded(), "{}", outcome.message());

        // downloaded from the GitHub raw URL
        assert_eq!(transfer.requested.borrow().as_slice(), [config.config_url()]);

        // previous configuration recoverable from the backup
        let backups: Vec<_> = fs::read_dir(&modpack)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains("_backup_"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read(backups[0].path()).unwrap(), b"previous");

        // new configuration in place
        assert_eq!(
            fs::read(modpack.join("wf_full.inf")).unwrap(),
            b"fresh configuration"
        );

        // temporary artifact cleaned up
        assert!(!temp_dir_base().join("wf_full.inf").exists());

        // installer launched with the configuration preloaded
        let launches = launcher.launches.borrow();
        assert_eq!(launches.len(), 1);
        assert_eq!(launches[0].executable, modpack.join(INSTALLER));
        assert_eq!(launches[0].args, vec!["/LOADINF=wf_full.inf".to_string()]);
        assert_eq!(launches[0].working_dir, modpack);
    }

    #[test]
    fn test_location_not_found_stops_before_any_download() {
        let temp = TempDir::new().unwrap();
        let config = test_config(&temp.path().join("nowhere"), "wf_nowhere.inf");

        let transfer = FakeTransfer::serving(b"unused");
        let launcher = FakeLauncher::succeeding();
        let outcome = run_with(&config, &transfer, &FakePrompt::cancelling(), &launcher);

        assert!(!outcome.succeeded());
        assert_eq!(
            outcome.exit_code(),
            crate::error::exit_codes::LOCATION_NOT_FOUND
        );
        assert!(transfer.requested.borrow().is_empty(), "no download attempted");
        assert!(launcher.launches.borrow().is_empty());
    }

    #[test]
    fn test_download_failure_is_surfaced_unchanged_and_stops_the_workflow() {
        let temp = TempDir::new().unwrap();
        let modpack = plant_modpack(&temp);
        let config = test_config(&modpack, "wf_dlfail.inf");

        let transfer = FakeTransfer::failing();
        let launcher = FakeLauncher::succeeding();
        let outcome = run_with(&config, &transfer, &FakePrompt::cancelling(), &launcher);

        assert!(!outcome.succeeded());
        assert_eq!(outcome.message(), "Could not download the file");
        assert_eq!(
            outcome.exit_code(),
            crate::error::exit_codes::DOWNLOAD_FAILED
        );
        assert!(!modpack.join("wf_dlfail.inf").exists());
        assert!(launcher.launches.borrow().is_empty());
    }

    #[test]
    fn test_launch_failure_does_not_undo_the_completed_install() {
        let temp = TempDir::new().unwrap();
        let modpack = plant_modpack(&temp);
        let config = test_config(&modpack, "wf_launchfail.inf");

        let transfer = FakeTransfer::serving(b"installed anyway");
        let launcher = FakeLauncher::failing();
        let outcome = run_with(&config, &transfer, &FakePrompt::cancelling(), &launcher);

        assert!(!outcome.succeeded());
        assert_eq!(
            outcome.exit_code(),
            crate::error::exit_codes::LAUNCH_FAILED
        );
        // no rollback: the copied configuration stays
        assert_eq!(
            fs::read(modpack.join("wf_launchfail.inf")).unwrap(),
            b"installed anyway"
        );
    }
}
