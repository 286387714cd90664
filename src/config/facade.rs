//! The `Config` facade: lookups and schema resolution over one source.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::trace;

use super::schema::{Fallback, Schema, Settings};
use super::source::ConfigSource;
use super::ConfigError;

/// Typed access to one configuration source.
///
/// ## Example
///
/// ```no_run
/// use kvconfig::{Config, Schema};
///
/// let config = Config::from_env_file(None)?;
/// let settings = config.read(
///     &Schema::new()
///         .required("DATABASE_URL")
///         .with_default("PORT", 3000),
/// )?;
///
/// let port = settings.get("PORT").and_then(|v| v.as_u64());
/// # Ok::<(), kvconfig::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Config {
    source: Box<dyn ConfigSource>,
}

impl Config {
    /// Binds a configuration facade to `source`.
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    pub fn source(&self) -> &dyn ConfigSource {
        self.source.as_ref()
    }

    /// Returns the raw value for `key`; the caller decides how to interpret it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.source.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.source.has(key)
    }

    /// Returns the whole document, if the source can provide one.
    pub fn get_all(&self) -> Result<Value, ConfigError> {
        self.source.get_all()
    }

    /// Resolves every setting declared in `schema`.
    ///
    /// Source values always win over declared defaults. Settings are
    /// processed in declaration order and the first required setting with
    /// no source value aborts the call with [`ConfigError::MissingRequired`].
    pub fn read(&self, schema: &Schema) -> Result<Settings, ConfigError> {
        let mut resolved = Map::new();

        for (name, fallback) in schema.iter() {
            let value = match (self.source.get(name), fallback) {
                (Some(value), _) => value.clone(),
                (None, Fallback::Value(default)) => {
                    trace!(setting = name, "using declared default");
                    default.clone()
                }
                (None, Fallback::Required) => {
                    return Err(ConfigError::MissingRequired {
                        name: name.to_string(),
                    });
                }
            };
            resolved.insert(name.to_string(), value);
        }

        Ok(Settings::from_map(resolved))
    }

    /// Resolves `schema` and deserializes the result into `T`.
    pub fn read_into<T: DeserializeOwned>(&self, schema: &Schema) -> Result<T, ConfigError> {
        self.read(schema)?.deserialize()
    }
}
