use serde_json::Value;

use super::ConfigError;

/// A backing store answering key lookups for a [`Config`](super::Config).
///
/// Only [`get`](Self::get) is mandatory. Providers without a native presence
/// check inherit one derived from `get`, and providers that cannot expose
/// their whole document report [`ConfigError::Unsupported`] from `get_all`.
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Option<&Value>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns a copy of the whole backing document.
    fn get_all(&self) -> Result<Value, ConfigError> {
        Err(ConfigError::Unsupported {
            operation: "get_all",
            source_kind: std::any::type_name::<Self>(),
        })
    }
}

/// Walks `root` along the `.`-separated segments of `key`.
///
/// Returns `None` as soon as a segment is missing or the current node is
/// not an object.
pub fn lookup_path<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}
