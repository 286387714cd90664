//! JSON document configuration source.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use super::file::{current_dir, read_config_file};
use super::source::{lookup_path, ConfigSource};
use super::ConfigError;

/// Environment variable that overrides a relative document path.
pub const JSON_PATH_ENV_VAR: &str = "KVCONFIG_JSON_PATH";

/// A configuration source backed by a JSON document.
///
/// Keys are dotted paths (`"database.port"`) walked through nested objects.
/// Values keep whatever type the document encodes; no coercion is applied.
///
/// A stored `null` counts as present: `get` returns `Some(&Value::Null)` and
/// `has` returns `true`. Presence is defined purely as "`get` is not `None`",
/// so there is no separate notion of a key holding the absent marker.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: Option<PathBuf>,
    root: Value,
}

impl JsonFileSource {
    /// Loads a JSON document, honouring [`JSON_PATH_ENV_VAR`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_override_var(path, JSON_PATH_ENV_VAR)
    }

    /// Loads a JSON document, reading the override location from `var`.
    ///
    /// Resolution order: an absolute `path` wins, then a non-empty `var`,
    /// then `path` relative to the current directory.
    pub fn load_with_override_var(
        path: impl AsRef<Path>,
        var: &str,
    ) -> Result<Self, ConfigError> {
        let override_path = std::env::var_os(var).filter(|v| !v.is_empty());
        let resolved = resolve_document_path(path.as_ref(), override_path, &current_dir()?);

        let contents = read_config_file(&resolved)?;
        let root: Value = serde_json::from_slice(&contents).map_err(|e| ConfigError::JsonParse {
            path: resolved.clone(),
            source: e,
        })?;
        debug!(path = %resolved.display(), "loaded JSON config");

        Ok(Self {
            path: Some(resolved),
            root,
        })
    }

    /// Wraps an in-memory document.
    pub fn from_value(root: Value) -> Self {
        Self { path: None, root }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ConfigSource for JsonFileSource {
    fn get(&self, key: &str) -> Option<&Value> {
        lookup_path(&self.root, key)
    }

    fn get_all(&self) -> Result<Value, ConfigError> {
        Ok(self.root.clone())
    }
}

/// Picks the effective document location.
pub fn resolve_document_path(path: &Path, override_path: Option<OsString>, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match override_path {
        Some(p) => cwd.join(p),
        None => cwd.join(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    // Never set by any test, so it always falls back to the given path.
    const UNSET_VAR: &str = "KVCONFIG_TEST_UNSET_JSON_PATH";

    fn write_doc(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_dotted_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "app.json", r#"{"a": {"b": 1}}"#);

        let src = JsonFileSource::load_with_override_var(&path, UNSET_VAR).unwrap();
        assert_eq!(src.get("a.b"), Some(&json!(1)));
        assert_eq!(src.get("a.c"), None);
        assert_eq!(src.get("x.y"), None);
        assert_eq!(src.path(), Some(path.as_path()));
    }

    #[test]
    fn test_preserves_document_types() {
        let src = JsonFileSource::from_value(json!({
            "port": "8080",
            "debug": true,
            "hosts": ["a", "b"],
            "db": {"pool": 5},
        }));

        assert_eq!(src.get("port"), Some(&json!("8080")));
        assert_eq!(src.get("debug"), Some(&json!(true)));
        assert_eq!(src.get("hosts"), Some(&json!(["a", "b"])));
        assert_eq!(src.get("db"), Some(&json!({"pool": 5})));
    }

    #[test]
    fn test_null_counts_as_present() {
        let src = JsonFileSource::from_value(json!({"nothing": null}));

        assert_eq!(src.get("nothing"), Some(&Value::Null));
        assert!(src.has("nothing"));
        assert!(!src.has("missing"));
    }

    #[test]
    fn test_has_agrees_with_get() {
        let src = JsonFileSource::from_value(json!({"a": {"b": false, "c": 0}, "s": ""}));

        for key in ["a", "a.b", "a.c", "s", "a.x", "s.x", "zzz", ""] {
            assert_eq!(src.has(key), src.get(key).is_some(), "key {key}");
        }
    }

    #[test]
    fn test_get_all_returns_copy_of_root() {
        let doc = json!({"a": {"b": 1}, "c": [1, 2]});
        let src = JsonFileSource::from_value(doc.clone());

        assert_eq!(src.get_all().unwrap(), doc);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = JsonFileSource::load_with_override_var(&path, UNSET_VAR).unwrap_err();
        assert!(matches!(&err, ConfigError::FileNotFound(p) if *p == path));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "bad.json", r#"{"a": {"b": 1"#);

        let err = JsonFileSource::load_with_override_var(&path, UNSET_VAR).unwrap_err();
        assert!(matches!(&err, ConfigError::JsonParse { path: p, .. } if *p == path));
        assert!(err.to_string().contains("invalid JSON content"));
        assert!(!err.to_string().contains("not found"));
    }

    #[test]
    fn test_resolve_absolute_wins() {
        let abs = Path::new("/etc/app/config.json");
        let resolved = resolve_document_path(abs, Some("/other.json".into()), Path::new("/work"));

        assert_eq!(resolved, abs);
    }

    #[test]
    fn test_resolve_override_wins_over_relative() {
        let resolved = resolve_document_path(
            Path::new("config.json"),
            Some("/override/config.json".into()),
            Path::new("/work"),
        );
        assert_eq!(resolved, PathBuf::from("/override/config.json"));

        let relative = resolve_document_path(
            Path::new("config.json"),
            Some("conf/other.json".into()),
            Path::new("/work"),
        );
        assert_eq!(relative, PathBuf::from("/work/conf/other.json"));
    }

    #[test]
    fn test_resolve_relative_against_cwd() {
        let resolved = resolve_document_path(Path::new("config.json"), None, Path::new("/work"));

        assert_eq!(resolved, PathBuf::from("/work/config.json"));
    }

    #[test]
    fn test_malformed_encoding_is_invalid_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        fs::write(&path, b"{\"name\": \"caf\xe9\"}").unwrap();

        let err = JsonFileSource::load_with_override_var(&path, UNSET_VAR).unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse { .. }));
    }

    #[test]
    fn test_load_honours_default_override_var() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "default-var.json", r#"{"source": "default var"}"#);
        std::env::set_var(JSON_PATH_ENV_VAR, &path);

        let result = JsonFileSource::load("kvconfig-never-exists.json");
        std::env::remove_var(JSON_PATH_ENV_VAR);

        let src = result.unwrap();
        assert_eq!(src.get("source"), Some(&json!("default var")));
        assert_eq!(src.path(), Some(path.as_path()));
    }

    #[test]
    fn test_load_reads_override_var() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "override.json", r#"{"source": "override"}"#);
        let var = "KVCONFIG_TEST_JSON_OVERRIDE";
        std::env::set_var(var, &path);

        let src = JsonFileSource::load_with_override_var("does-not-exist.json", var).unwrap();
        std::env::remove_var(var);

        assert_eq!(src.get("source"), Some(&json!("override")));
    }
}
