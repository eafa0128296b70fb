//! Installer self-update workflow
//!
//! An existing installation is optional here: when none is found the new
//! installer is downloaded and launched without replacing anything. A URL
//! that is the vendor's download page rather than a direct binary link aborts
//! the download and opens the page in the browser instead.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::download::{DecileTracker, HttpTransfer, Transfer, format_bytes};
use crate::error::RoboError;
use crate::finder::AslainFinder;
use crate::install;
use crate::launch::{Launcher, SystemLauncher};
use crate::outcome::Outcome;
use crate::prompt::{ConsolePrompt, Prompt};
use crate::temp::temp_dir_base;

const ASLAIN_DOWNLOAD_PAGE: &str = "https://aslain.com/index.php?/topic/13-download/";
const INSTALLER_TEMP_NAME: &str = "Aslains_WoT_Modpack_Installer_Latest.exe";
const INSTALLER_DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Run the self-update workflow with the real capabilities.
pub fn run(config: &AppConfig, url_override: Option<String>) -> Outcome<()> {
    run_with(
        config,
        url_override,
        &HttpTransfer::new(INSTALLER_DOWNLOAD_TIMEOUT),
        &ConsolePrompt,
        &SystemLauncher,
    )
}

/// The tool has always told vendor pages and direct links apart by this
/// string check; keep its exact behavior.
fn is_vendor_page(url: &str) -> bool {
    url.contains("aslain.com") && !url.ends_with(".exe")
}

pub(crate) fn run_with(
    config: &AppConfig,
    url_override: Option<String>,
    transfer: &dyn Transfer,
    prompt: &dyn Prompt,
    launcher: &dyn Launcher,
) -> Outcome<()> {
    info!("mode: installer self-update");

    println!("Looking for an existing Aslain's Modpack folder...");
    let location = match AslainFinder::new(config).find(prompt) {
        Outcome::Success { payload, .. } => {
            println!(
                "{} Folder found: {}",
                style("✓").green(),
                payload.path.display()
            );
            Some(payload)
        }
        Outcome::Failure { message, .. } => {
            warn!("{message}");
            println!(
                "{} No existing installation found, downloading only.",
                style("!").yellow()
            );
            None
        }
    };

    let url = url_override
        .or_else(|| config.aslain_download_url.clone())
        .unwrap_or_else(|| ASLAIN_DOWNLOAD_PAGE.to_string());

    if is_vendor_page(&url) {
        warn!("not a direct installer link: {url}");
        println!("To download automatically:");
        println!("  1. Visit the Aslain download page");
        println!("  2. Copy the DIRECT link of the .exe file");
        println!("  3. Run again with: roboaslain --update-aslain <URL>");
        launcher.open_url(&url);
        return Outcome::fail_with(
            "A direct download URL is required",
            Some("The browser was opened on the Aslain download page".to_string()),
            Some(RoboError::DownloadFailed {
                url,
                reason: "not a direct installer link".to_string(),
            }),
        );
    }

    let artifact = temp_dir_base().join(INSTALLER_TEMP_NAME);
    println!("Downloading from: {url}");
    println!("This can take several minutes...");

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes}")
            .unwrap()
            .progress_chars("#>-"),
    );
    let tracker = DecileTracker::new();
    let progress = |downloaded: u64, total: Option<u64>| {
        if let Some(total) = total {
            bar.set_length(total);
            bar.set_position(downloaded);
        }
        if let Some(percent) = tracker.crossed(downloaded, total) {
            debug!(
                "download progress: {percent}% ({})",
                format_bytes(downloaded)
            );
        }
    };
    let downloaded = transfer.download(&url, &artifact, Some(&progress));
    bar.finish_and_clear();
    if !downloaded.succeeded() {
        return downloaded.forward_failure();
    }
    println!(
        "{} Installer downloaded ({})",
        style("✓").green(),
        downloaded
            .payload()
            .map(|bytes| format_bytes(*bytes))
            .unwrap_or_default()
    );

    let launched = match &location {
        Some(location) => {
            println!("Installing the new installer...");
            let replaced = install::replace_installer(&artifact, location);
            if !replaced.succeeded() {
                return replaced.forward_failure();
            }
            println!("{} {}", style("✓").green(), replaced.message());

            println!("Launching the new installer...");
            let launched = launcher.start_process(&location.installer_path, &[], &location.path);
            if launched.succeeded() {
                if let Err(e) = std::fs::remove_file(&artifact) {
                    debug!("could not remove the temporary download: {e}");
                }
            }
            launched
        }
        None => {
            // the downloaded file is the only copy, it stays in place
            println!("Launching the downloaded installer...");
            let working_dir = artifact
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(temp_dir_base);
            launcher.start_process(&artifact, &[], &working_dir)
        }
    };
    if !launched.succeeded() {
        return launched.forward_failure();
    }

    Outcome::ok_with(
        "Update launched",
        (),
        "Follow the installer's on-screen instructions to complete the update".to_string(),
    )
}
