//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub service: ServiceConfig,
}

/// Browser connection and launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// DevTools debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Explicit browser binary; auto-detected when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<String>,

    /// Profile directory, kept so the service login survives restarts.
    #[serde(default = "default_profile_dir")]
    pub profile_dir: PathBuf,

    /// Run the browser headless.
    #[serde(default)]
    pub headless: bool,
}

impl BrowserConfig {
    /// HTTP endpoint for DevTools discovery.
    pub fn endpoint(&self) -> String {
        format!("http://127.0.0.1:{}", self.debug_port)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            chrome_path: None,
            profile_dir: default_profile_dir(),
            headless: false,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_profile_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".linklift")
        .join("browser-profile")
}

/// Host service pages the automation drives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Albums listing page, scraped by `discover`.
    #[serde(default = "default_albums_url")]
    pub albums_url: String,

    /// Shared-items listing page, scanned by the collection pass.
    #[serde(default = "default_sharing_url")]
    pub sharing_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            albums_url: default_albums_url(),
            sharing_url: default_sharing_url(),
        }
    }
}

fn default_albums_url() -> String {
    "https://photos.google.com/albums".to_string()
}

fn default_sharing_url() -> String {
    "https://photos.google.com/sharing".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.browser.debug_port, 9222);
        assert!(!config.browser.headless);
        assert!(config.browser.chrome_path.is_none());
        assert_eq!(config.service.albums_url, "https://photos.google.com/albums");
    }

    #[test]
    fn test_browser_endpoint() {
        let mut browser = BrowserConfig::default();
        browser.debug_port = 9333;
        assert_eq!(browser.endpoint(), "http://127.0.0.1:9333");
    }

    #[test]
    fn test_profile_dir_under_home() {
        let browser = BrowserConfig::default();
        assert!(browser.profile_dir.ends_with(".linklift/browser-profile"));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml = r#"
            [browser]
            debug_port = 9444
            headless = true

            [service]
            albums_url = "https://photos.google.com/u/1/albums"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.browser.debug_port, 9444);
        assert!(config.browser.headless);
        assert_eq!(config.service.albums_url, "https://photos.google.com/u/1/albums");
        // Unset sections keep their defaults.
        assert_eq!(config.service.sharing_url, "https://photos.google.com/sharing");
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: Config = toml::from_str("[browser]\nheadless = true\n").unwrap();
        assert!(config.browser.headless);
        assert_eq!(config.browser.debug_port, 9222);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("debug_port"));
        assert!(toml.contains("albums_url"));
        assert!(!toml.contains("chrome_path"));
    }
}
