//! Configuration loader.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

static ENV_REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Substitute `${VAR}` references from the process environment.
    ///
    /// An unset variable fails the whole load; a half-expanded config is
    /// worse than none.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut missing: Option<String> = None;
        let expanded = ENV_REF_RE.replace_all(content, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    missing.get_or_insert_with(|| name.to_string());
                    String::new()
                }
            }
        });

        match missing {
            Some(name) => Err(ConfigError::EnvVarNotSet(name)),
            None => Ok(expanded.into_owned()),
        }
    }

    /// Expand a leading tilde in user-supplied paths such as
    /// `~/.linklift/browser-profile`.
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.browser.debug_port, 9222);
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [browser]
            debug_port = 9333
            headless = true
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.debug_port, 9333);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[browser]").unwrap();
        writeln!(file, "debug_port = 9500").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.browser.debug_port, 9500);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/linklift.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/linklift.toml")).unwrap();
        assert_eq!(config.browser.debug_port, 9222);
    }

    #[test]
    fn test_load_or_default_still_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid = [unclosed").unwrap();

        let result = ConfigLoader::load_or_default(file.path());
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let content = "invalid = [unclosed";
        let result = ConfigLoader::load_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: the variable name is unique to this test, so no other
        // thread reads or writes it concurrently
        unsafe {
            std::env::set_var("LINKLIFT_TEST_VAR", "/opt/chrome");
        }
        let content = "[browser]\nchrome_path = \"${LINKLIFT_TEST_VAR}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.chrome_path.as_deref(), Some("/opt/chrome"));
        unsafe {
            std::env::remove_var("LINKLIFT_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_TEST_VAR_12345}\"";
        let result = ConfigLoader::load_str(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name.contains("12345")));
    }

    #[test]
    fn test_expand_path() {
        // Absolute paths pass through untouched, tildes resolve to $HOME.
        assert_eq!(ConfigLoader::expand_path("/usr/local/bin"), "/usr/local/bin");
        let expanded = ConfigLoader::expand_path("~/profile");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/profile"));
    }
}
