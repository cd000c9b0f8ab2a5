//! Runtime settings.
//!
//! Layered with the `config` crate, later sources winning:
//! - built-in defaults
//! - `tweetshot.toml` in the platform config directory
//!   (Linux: ~/.config/tweetshot/, macOS: ~/Library/Application Support/tweetshot/)
//! - an explicit config file, if given
//! - `TWEETSHOT_*` environment variables

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

/// Default rendering API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.twittershots.com";

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "TWEETSHOT";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The configuration sources could not be read or merged.
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),

    /// A setting holds an unusable value.
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid {
        /// Setting name.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Settings for talking to the rendering API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the rendering API.
    pub base_url: String,
    /// API key, if given inline.
    pub api_key: Option<String>,
    /// File holding the API key; takes precedence over `api_key`.
    pub api_key_file: Option<PathBuf>,
    /// Per-request timeout, in seconds.
    pub timeout_secs: u64,
    /// Record failed items instead of aborting the batch.
    pub continue_on_error: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_file: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            continue_on_error: false,
        }
    }
}

impl Settings {
    /// Loads settings from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if `config_file` is missing or unreadable, or if a
    /// merged value is invalid.
    pub fn load(config_file: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();

        if let Some(path) = Self::default_config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        Self::from_config(builder.build()?)
    }

    fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Returns the path of the per-user config file, if a config directory exists.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tweetshot").join("tweetshot.toml"))
    }

    /// Returns the parsed base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let url = Url::parse(&self.base_url).map_err(|e| SettingsError::Invalid {
            key: "base_url",
            reason: format!("{e}: {}", self.base_url),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::Invalid {
                key: "base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(url)
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks that every setting holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] naming the first bad setting.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.base_url()?;
        if self.timeout_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn from_file(path: &Path) -> Result<Settings, SettingsError> {
        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .build()?;
        Settings::from_config(config)
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_config(Config::builder().build().unwrap()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.base_url().unwrap().as_str(), "https://api.twittershots.com/");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
base_url = "http://localhost:8080"
api_key = "secret"
timeout_secs = 5
continue_on_error = true
"#,
        );

        let settings = from_file(file.path()).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8080");
        assert_eq!(settings.api_key.as_deref(), Some("secret"));
        assert_eq!(settings.timeout_secs, 5);
        assert!(settings.continue_on_error);
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let file = toml_file(r#"base_url = "ftp://example.com""#);
        assert!(matches!(
            from_file(file.path()),
            Err(SettingsError::Invalid { key: "base_url", .. })
        ));

        let file = toml_file(r#"base_url = "not a url""#);
        assert!(from_file(file.path()).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let file = toml_file("timeout_secs = 0");
        assert!(matches!(
            from_file(file.path()),
            Err(SettingsError::Invalid { key: "timeout_secs", .. })
        ));
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let result = Settings::load(Some(Path::new("/nonexistent/tweetshot.toml")));
        assert!(matches!(result, Err(SettingsError::Build(_))));
    }

    #[test]
    fn test_default_config_path() {
        if let Some(path) = Settings::default_config_path() {
            assert!(path.ends_with("tweetshot/tweetshot.toml"));
        }
    }
}
