//! HTTP downloads, behind a capability trait so workflows can be tested
//! without a network.

use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::error::RoboError;
use crate::outcome::Outcome;

const USER_AGENT: &str = concat!("roboaslain/", env!("CARGO_PKG_VERSION"));

/// Called after each chunk with `(bytes_downloaded, total_bytes)`. The total
/// is `None` when the server did not announce a content length.
pub type ProgressFn<'a> = &'a dyn Fn(u64, Option<u64>);

/// Download a resource to a path.
pub trait Transfer {
    /// Streams `url` into `dest`, overwriting it. The payload is the number
    /// of bytes transferred.
    fn download(&self, url: &str, dest: &Path, progress: Option<ProgressFn>) -> Outcome<u64>;
}

/// Blocking HTTP downloader. The write to the destination is exclusive: the
/// file is created fresh and truncated, never shared.
pub struct HttpTransfer {
    timeout: Duration,
}

impl HttpTransfer {
    pub fn new(timeout: Duration) -> Self {
        HttpTransfer { timeout }
    }
}

impl Transfer for HttpTransfer {
    fn download(&self, url: &str, dest: &Path, progress: Option<ProgressFn>) -> Outcome<u64> {
        debug!("downloading {url} to {}", dest.display());

        let client = match reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                return Outcome::fail_with(
                    "Could not prepare the download",
                    Some(e.to_string()),
                    Some(RoboError::Internal {
                        message: format!("building HTTP client: {e}"),
                    }),
                );
            }
        };

        let response = match client.get(url).send() {
            Ok(response) => response,
            Err(e) => return request_failure(e, url),
        };

        let mut response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                let reason = e
                    .status()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| e.to_string());
                return Outcome::fail_with(
                    "The server refused the download",
                    Some(format!("URL: {url}")),
                    Some(RoboError::DownloadFailed {
                        url: url.to_string(),
                        reason,
                    }),
                );
            }
        };

        let total = response.content_length();

        let mut file = match std::fs::File::create(dest) {
            Ok(file) => file,
            Err(e) => {
                return Outcome::fail_with(
                    "Could not create the destination file",
                    Some(format!("Path: {}", dest.display())),
                    Some(RoboError::DownloadFailed {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }),
                );
            }
        };

        let mut downloaded: u64 = 0;
        let mut buf = [0u8; 8192];
        loop {
            let read = match response.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    let cause = if e.kind() == std::io::ErrorKind::TimedOut {
                        RoboError::DownloadTimedOut {
                            url: url.to_string(),
                        }
                    } else {
                        RoboError::DownloadFailed {
                            url: url.to_string(),
                            reason: e.to_string(),
                        }
                    };
                    return Outcome::fail_with(
                        "The download was interrupted",
                        Some(format!("URL: {url}")),
                        Some(cause),
                    );
                }
            };
            if let Err(e) = file.write_all(&buf[..read]) {
                return Outcome::fail_with(
                    "Could not write the downloaded data",
                    Some(format!("Path: {}", dest.display())),
                    Some(RoboError::DownloadFailed {
                        url: url.to_string(),
                        reason: e.to_string(),
                    }),
                );
            }
            downloaded += read as u64;
            if let Some(report) = progress {
                report(downloaded, total);
            }
        }

        if !dest.exists() {
            return Outcome::fail_with(
                "The file was not downloaded",
                Some(format!("Expected path: {}", dest.display())),
                Some(RoboError::DownloadFailed {
                    url: url.to_string(),
                    reason: "destination missing after download".to_string(),
                }),
            );
        }

        debug!("downloaded {} ({})", dest.display(), format_bytes(downloaded));
        Outcome::ok_with(
            "Download complete",
            downloaded,
            format!("Size: {}", format_bytes(downloaded)),
        )
    }
}

fn request_failure<T>(e: reqwest::Error, url: &str) -> Outcome<T> {
    if e.is_timeout() {
        Outcome::fail_with(
            "The download took too long",
            Some("Retry with a better connection".to_string()),
            Some(RoboError::DownloadTimedOut {
                url: url.to_string(),
            }),
        )
    } else if e.is_connect() {
        Outcome::fail_with(
            "Could not download the file",
            Some(format!("Check your internet connection. URL: {url}")),
            Some(RoboError::DownloadUnreachable {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        )
    } else {
        Outcome::fail_with(
            "Could not download the file",
            Some(format!("URL: {url}")),
            Some(RoboError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }),
        )
    }
}

/// Human-readable byte count (B/KB/MB/GB).
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit])
    }
}

/// Tracks which 10%-of-total boundaries a download has crossed, so progress
/// is reported coarsely instead of per-chunk.
pub struct DecileTracker {
    last: std::cell::Cell<u64>,
}

impl Default for DecileTracker {
    fn default() -> Self {
        DecileTracker::new()
    }
}

impl DecileTracker {
    pub fn new() -> Self {
        DecileTracker {
            last: std::cell::Cell::new(0),
        }
    }

    /// Returns `Some(percent)` the first time `downloaded` crosses a new 10%
    /// boundary of `total`, `None` otherwise or when the total is unknown.
    pub fn crossed(&self, downloaded: u64, total: Option<u64>) -> Option<u64> {
        let total = total.filter(|t| *t > 0)?;
        let decile = (downloaded.min(total) * 10) / total;
        if decile > self.last.get() {
            self.last.set(decile);
            Some(decile * 10)
        } else {
            None
        }
    }
}
