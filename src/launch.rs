//! Process launching and URL opening, behind a capability trait so the
//! orchestration logic stays platform-independent and testable with fakes.

use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::error::RoboError;
use crate::outcome::Outcome;

pub trait Launcher {
    /// Start `executable` with `args` in `working_dir`, detached. The payload
    /// is the child's PID.
    fn start_process(&self, executable: &Path, args: &[String], working_dir: &Path)
    -> Outcome<u32>;

    /// Open a URL with the system's default handler. Best effort: failures
    /// are logged and swallowed.
    fn open_url(&self, url: &str);
}

/// Real launcher backed by `std::process` and the `open` crate.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn start_process(
        &self,
        executable: &Path,
        args: &[String],
        working_dir: &Path,
    ) -> Outcome<u32> {
        debug!("launching {} {:?} in {}", executable.display(), args, working_dir.display());

        match Command::new(executable)
            .args(args)
            .current_dir(working_dir)
            .spawn()
        {
            Ok(child) => {
                let pid = child.id();
                Outcome::ok_with("Installer launched", pid, format!("PID: {pid}"))
            }
            Err(e) => Outcome::fail_with(
                "Could not start the installer",
                Some(format!("Executable: {}", executable.display())),
                Some(RoboError::LaunchFailed {
                    executable: executable.display().to_string(),
                    reason: e.to_string(),
                }),
            ),
        }
    }

    fn open_url(&self, url: &str) {
        if let Err(e) = open::that(url) {
            warn!("could not open {url} in the default browser: {e}");
        }
    }
}
