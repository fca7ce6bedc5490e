//! Chrome lifecycle: find, launch, reuse, shutdown.
//!
//! An already-running Chrome on the debug port is reused so the operator's
//! signed-in profile keeps working; otherwise one is launched with a
//! dedicated profile directory and killed again on shutdown.

use std::path::PathBuf;
use std::process::Stdio;

use linklift_protocols::SurfaceError;
use thiserror::Error;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Launcher errors.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Chrome not found. Please install Google Chrome.")]
    ChromeNotFound,

    #[error("Failed to launch Chrome: {0}")]
    LaunchFailed(String),
}

impl From<LaunchError> for SurfaceError {
    fn from(e: LaunchError) -> Self {
        SurfaceError::Transport(e.to_string())
    }
}

/// Browser launch configuration.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Chrome debugging port.
    pub debug_port: u16,
    /// Explicit Chrome binary, overriding auto-detection.
    pub chrome_path: Option<PathBuf>,
    /// Profile directory for persistent login state.
    pub profile_dir: Option<PathBuf>,
    /// Whether to run Chrome in headless mode.
    pub headless: bool,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            chrome_path: None,
            profile_dir: None,
            headless: false,
        }
    }
}

impl LauncherConfig {
    /// Get the profile directory, falling back to the default location.
    pub fn resolved_profile_dir(&self) -> PathBuf {
        self.profile_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".linklift")
                .join("browser-profile")
        })
    }

    /// Get the CDP endpoint URL.
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debug_port)
    }
}

/// Manages the Chrome process backing the CDP endpoint.
pub struct ChromeLauncher {
    config: LauncherConfig,
    /// Chrome process handle (if we launched it).
    process: Mutex<Option<Child>>,
}

impl ChromeLauncher {
    pub fn new(config: LauncherConfig) -> Self {
        Self {
            config,
            process: Mutex::new(None),
        }
    }

    pub fn endpoint(&self) -> String {
        self.config.endpoint()
    }

    /// Find a Chrome-family executable in the usual install locations.
    pub fn find_chrome() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        const CANDIDATES: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        const CANDIDATES: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        const CANDIDATES: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        const CANDIDATES: &[&str] = &[];

        CANDIDATES.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Check if Chrome is already serving the debug endpoint.
    pub async fn is_running(&self) -> bool {
        reqwest::get(format!("{}/json/version", self.config.endpoint()))
            .await
            .is_ok()
    }

    /// Launch Chrome with remote debugging enabled.
    async fn launch(&self) -> Result<Child, LaunchError> {
        let chrome_path = self
            .config
            .chrome_path
            .clone()
            .or_else(Self::find_chrome)
            .ok_or(LaunchError::ChromeNotFound)?;
        let profile_dir = self.config.resolved_profile_dir();

        // Chrome creates the profile dir itself when missing; this only
        // front-loads a clearer warning for unwritable parents.
        if let Err(e) = std::fs::create_dir_all(&profile_dir) {
            warn!("Could not create profile dir {}: {}", profile_dir.display(), e);
        }

        info!("Launching Chrome, profile {}", profile_dir.display());

        let mut cmd = Command::new(&chrome_path);
        cmd.args([
            format!("--remote-debugging-port={}", self.config.debug_port),
            format!("--user-data-dir={}", profile_dir.display()),
        ]);
        // Quiet everything unrelated to the page under automation.
        cmd.args([
            "--no-first-run",
            "--no-default-browser-check",
            "--disable-background-networking",
            "--disable-sync",
            "--metrics-recording-only",
        ]);
        if self.config.headless {
            cmd.arg("--headless=new");
        }
        cmd.stdout(Stdio::null()).stderr(Stdio::null());

        let child = cmd
            .spawn()
            .map_err(|e| LaunchError::LaunchFailed(e.to_string()))?;

        info!("Chrome up, pid {:?}", child.id());
        Ok(child)
    }

    /// Make sure Chrome is serving the debug endpoint, launching it if
    /// necessary.
    pub async fn ensure_running(&self) -> Result<(), LaunchError> {
        if self.is_running().await {
            info!(
                "Chrome already running on port {}",
                self.config.debug_port
            );
            return Ok(());
        }

        info!(
            "Chrome not running on port {}, launching...",
            self.config.debug_port
        );

        let child = self.launch().await?;
        *self.process.lock().await = Some(child);

        let mut attempts = 0;
        let max_attempts = 30;
        while attempts < max_attempts {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            if self.is_running().await {
                return Ok(());
            }
            attempts += 1;
        }

        Err(LaunchError::LaunchFailed(
            "Chrome failed to start within timeout".to_string(),
        ))
    }

    /// Shut down Chrome if we launched it. A reused instance is left alone.
    pub async fn shutdown(&self) {
        if let Some(mut child) = self.process.lock().await.take() {
            info!("Stopping the Chrome we launched");
            let _ = child.kill().await;
        }
    }
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
