//! Error types and exit-code mapping.
//!
//! Uses `thiserror` for error definitions and `miette` for pretty
//! diagnostics. Expected non-matches during location resolution are not
//! errors; everything here represents an operational failure that ends a
//! workflow and determines the process exit code.

use miette::Diagnostic;
use thiserror::Error;

/// Stable process exit codes, one per failure class.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const LOCATION_NOT_FOUND: i32 = 1;
    pub const DOWNLOAD_FAILED: i32 = 2;
    pub const DOWNLOAD_UNREACHABLE: i32 = 3;
    pub const INSTALL_COPY_FAILED: i32 = 4;
    pub const PERMISSION_DENIED: i32 = 5;
    pub const LAUNCH_FAILED: i32 = 6;
    pub const CONFIG_INVALID: i32 = 7;
    pub const INTERNAL: i32 = 99;
}

/// Main error type for roboaslain operations
#[derive(Error, Diagnostic, Debug)]
pub enum RoboError {
    #[error("Could not locate the Aslain's Modpack folder")]
    #[diagnostic(
        code(roboaslain::finder::not_found),
        help("Make sure World of Tanks EU and Aslain's Modpack are both installed")
    )]
    LocationNotFound,

    #[error("Download failed: {url}")]
    #[diagnostic(code(roboaslain::download::failed))]
    DownloadFailed { url: String, reason: String },

    #[error("Could not reach the download server: {url}")]
    #[diagnostic(
        code(roboaslain::download::unreachable),
        help("Check your internet connection and the URL, then try again")
    )]
    DownloadUnreachable { url: String, reason: String },

    #[error("The download timed out: {url}")]
    #[diagnostic(
        code(roboaslain::download::timed_out),
        help("Retry with a better connection; large installers can take several minutes")
    )]
    DownloadTimedOut { url: String },

    #[error("Could not write file: {path}")]
    #[diagnostic(code(roboaslain::install::copy_failed))]
    InstallCopyFailed { path: String, reason: String },

    #[error("Insufficient permissions to write: {path}")]
    #[diagnostic(
        code(roboaslain::install::permission_denied),
        help("Try running the program as administrator")
    )]
    PermissionDenied { path: String },

    #[error("Could not start the installer: {executable}")]
    #[diagnostic(code(roboaslain::launch::failed))]
    LaunchFailed { executable: String, reason: String },

    #[error("Could not create backup of: {path}")]
    #[diagnostic(code(roboaslain::backup::failed))]
    BackupFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(roboaslain::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration file: {path}")]
    #[diagnostic(
        code(roboaslain::config::invalid),
        help("The configuration file must be valid YAML; see README for the accepted keys")
    )]
    ConfigInvalid { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(roboaslain::io_error))]
    IoError { message: String },

    #[error("Unexpected internal failure: {message}")]
    #[diagnostic(code(roboaslain::internal))]
    Internal { message: String },
}

impl RoboError {
    /// Map this error to its documented process exit code.
    pub fn exit_code(&self) -> i32 {
        use exit_codes::*;
        match self {
            RoboError::LocationNotFound => LOCATION_NOT_FOUND,
            RoboError::DownloadFailed { .. } => DOWNLOAD_FAILED,
            RoboError::DownloadUnreachable { .. } | RoboError::DownloadTimedOut { .. } => {
                DOWNLOAD_UNREACHABLE
            }
            RoboError::InstallCopyFailed { .. } => INSTALL_COPY_FAILED,
            RoboError::PermissionDenied { .. } => PERMISSION_DENIED,
            RoboError::LaunchFailed { .. } => LAUNCH_FAILED,
            RoboError::ConfigReadFailed { .. } | RoboError::ConfigInvalid { .. } => CONFIG_INVALID,
            RoboError::BackupFailed { .. }
            | RoboError::IoError { .. }
            | RoboError::Internal { .. } => INTERNAL,
        }
    }
}

impl From<std::io::Error> for RoboError {
    fn from(err: std::io::Error) -> Self {
        RoboError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RoboError>;
