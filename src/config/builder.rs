//! Construction helpers binding a `Config` to an env file or JSON document.

use std::path::{Path, PathBuf};

use super::env::EnvFileSource;
use super::json::{JsonFileSource, JSON_PATH_ENV_VAR};
use super::{Config, ConfigError};

/// The source a [`ConfigBuilder`] will load.
#[derive(Debug)]
enum SourceKind {
    EnvFile { path: Option<PathBuf> },
    Json { path: PathBuf },
}

/// Builder selecting and loading the source behind a [`Config`].
///
/// Only one source is used; the last one selected wins. With nothing
/// selected the builder loads a `.env` file found from the current
/// directory upwards.
///
/// ## Example
///
/// ```no_run
/// use kvconfig::Config;
///
/// let config = Config::builder()
///     .json_file("config/app.json")
///     .json_path_var("MYAPP_CONFIG")
///     .build()?;
/// # Ok::<(), kvconfig::ConfigError>(())
/// ```
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigBuilder {
    source: SourceKind,
    json_path_var: String,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            source: SourceKind::EnvFile { path: None },
            json_path_var: JSON_PATH_ENV_VAR.to_string(),
        }
    }
}

impl ConfigBuilder {
    /// Uses an env file. Relative paths are searched for upwards from the
    /// current directory.
    pub fn env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.source = SourceKind::EnvFile {
            path: Some(path.as_ref().to_path_buf()),
        };
        self
    }

    /// Uses a JSON document.
    pub fn json_file(mut self, path: impl AsRef<Path>) -> Self {
        self.source = SourceKind::Json {
            path: path.as_ref().to_path_buf(),
        };
        self
    }

    /// Sets the environment variable that may override a relative JSON path.
    pub fn json_path_var(mut self, var: impl Into<String>) -> Self {
        self.json_path_var = var.into();
        self
    }

    /// Loads the selected source and binds it to a [`Config`].
    pub fn build(self) -> Result<Config, ConfigError> {
        match self.source {
            SourceKind::EnvFile { path } => Ok(Config::new(EnvFileSource::load(path.as_deref())?)),
            SourceKind::Json { path } => Ok(Config::new(
                JsonFileSource::load_with_override_var(path, &self.json_path_var)?,
            )),
        }
    }
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Loads an env file (default `.env`) into a new `Config`.
    pub fn from_env_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(EnvFileSource::load(path)?))
    }

    /// Loads a JSON document into a new `Config`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(JsonFileSource::load(path)?))
    }
}
