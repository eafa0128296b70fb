//! Logging setup: styled console diagnostics on stderr plus a per-run
//! timestamped log file in the system temp directory.
//!
//! stdout stays reserved for the user-facing workflow output; `tracing`
//! events go to stderr (INFO, or DEBUG with `--verbose`) and to the log file
//! (always DEBUG). Failing to create the log file is tolerated; the run
//! continues console-only.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::temp::temp_dir_base;

/// Where this run's log file ended up, if one could be created.
pub struct LogHandle {
    pub path: Option<PathBuf>,
}

/// Initialize the global subscriber. `RUST_LOG` overrides the console level.
pub fn init(verbose: bool) -> LogHandle {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = temp_dir_base().join(format!("RoboAslainInstaller_{stamp}.log"));

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "roboaslain=debug"
        } else {
            "roboaslain=info"
        })
    });
    let console_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let (file_layer, path) = match File::create(&log_path) {
        Ok(file) => {
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(log_path))
        }
        Err(_) => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();

    tracing::debug!(
        "roboaslain {} on {}",
        env!("CARGO_PKG_VERSION"),
        sysinfo::System::long_os_version().unwrap_or_else(|| "unknown OS".to_string())
    );

    LogHandle { path }
}
