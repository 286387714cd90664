//! Settings schemas and the settings they resolve to.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::ConfigError;

/// What to do when a setting has no value in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// The setting must be present in the source.
    Required,
    /// Use this value when the setting is absent.
    Value(Value),
}

impl Fallback {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

/// An ordered declaration of setting names and their fallbacks.
///
/// Settings are resolved in declaration order, so the first missing
/// required setting is the one reported by [`Config::read`](super::Config::read).
///
/// ## Example
///
/// ```
/// use kvconfig::Schema;
///
/// let schema = Schema::new()
///     .required("DATABASE_URL")
///     .with_default("PORT", 3000);
///
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Schema {
    entries: Vec<(String, Fallback)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a setting that must come from the source.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.insert(name, Fallback::Required);
        self
    }

    /// Declares a setting with a default used when the source lacks it.
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, Fallback::value(value));
        self
    }

    /// Adds or replaces a declaration.
    ///
    /// Re-declaring a name replaces its fallback but keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, fallback: Fallback) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = fallback,
            None => self.entries.push((name, fallback)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fallback)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Fallback)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Fallback)>>(iter: I) -> Self {
        let mut schema = Self::new();
        for (name, fallback) in iter {
            schema.insert(name, fallback);
        }
        schema
    }
}

/// Settings resolved from a [`Schema`], holding exactly the schema's keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    pub(crate) fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    /// Deserializes the settings into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        serde_json::from_value(Value::Object(self.values.clone())).map_err(ConfigError::from)
    }
}
