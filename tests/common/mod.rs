//! Common test utilities for roboaslain integration tests

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;

use tempfile::TempDir;

/// A staged Aslain's Modpack installation inside a temp directory, plus a
/// search-configuration YAML pointing the binary at it.
#[allow(dead_code)]
pub struct TestInstallation {
    pub temp: TempDir,
    /// The modpack directory containing the installer marker.
    pub modpack: PathBuf,
    /// YAML config file to pass via --config.
    pub config_file: PathBuf,
}

pub const INSTALLER_NAME: &str = "fake_installer.sh";
pub const CONFIG_FILE_NAME: &str = "robo_config_it.inf";

#[allow(dead_code)]
impl TestInstallation {
    /// Stage a modpack directory whose installer is an executable script, so
    /// launching it actually works in tests.
    pub fn new(config_download_url: Option<&str>) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let modpack = temp.path().join("World_of_Tanks_EU").join("Aslain_Modpack");
        std::fs::create_dir_all(&modpack).expect("Failed to create modpack directory");

        let installer = modpack.join(INSTALLER_NAME);
        std::fs::write(&installer, "#!/bin/sh\nexit 0\n").expect("Failed to write installer");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&installer, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to mark installer executable");
        }

        let config_file = temp.path().join("roboaslain.yaml");
        let mut yaml = format!(
            "installer_name: {INSTALLER_NAME}\n\
             config_file_name: {CONFIG_FILE_NAME}\n\
             known_locations:\n  - {}\n\
             scan_volumes: []\n",
            modpack.display()
        );
        if let Some(url) = config_download_url {
            yaml.push_str(&format!("config_download_url: {url}\n"));
        }
        std::fs::write(&config_file, yaml).expect("Failed to write config file");

        Self {
            temp,
            modpack,
            config_file,
        }
    }

    /// A configuration whose candidate list is empty and whose scan covers
    /// no volumes: resolution can only fall through to the manual prompt.
    pub fn unfindable() -> Self {
        let staged = Self::new(None);
        std::fs::write(
            &staged.config_file,
            format!(
                "installer_name: {INSTALLER_NAME}\n\
                 config_file_name: {CONFIG_FILE_NAME}\n\
                 known_locations: []\n\
                 scan_volumes: []\n"
            ),
        )
        .expect("Failed to write config file");
        staged
    }

    pub fn installed_config(&self) -> PathBuf {
        self.modpack.join(CONFIG_FILE_NAME)
    }

    pub fn backups(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.modpack)
            .expect("Failed to read modpack directory")
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().contains("_backup_"))
                    .unwrap_or(false)
            })
            .collect()
    }
}

/// Serves exactly one HTTP response on a random local port and returns the
/// URL of the artifact.
#[allow(dead_code)]
pub fn serve_once(body: &'static [u8], artifact_name: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let port = listener.local_addr().expect("Failed to read local addr").port();

    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
    });

    format!("http://127.0.0.1:{port}/{artifact_name}")
}
