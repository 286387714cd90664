//! Environment-file (`KEY=value`) configuration source.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde_json::{Number, Value};
use tracing::debug;

use super::file::{current_dir, read_config_file};
use super::source::ConfigSource;
use super::ConfigError;

/// File name searched for when no env file path is given.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// A configuration source backed by a `KEY=value` env file.
///
/// The file is parsed once at construction and values are coerced to
/// booleans, numbers or strings (see [`coerce_value`]). Values are taken
/// verbatim: `$VAR` and `${VAR}` are not expanded, and the process
/// environment is neither read nor modified.
#[derive(Debug, Clone)]
pub struct EnvFileSource {
    path: Option<PathBuf>,
    values: HashMap<String, Value>,
}

impl EnvFileSource {
    /// Locates and loads an env file.
    ///
    /// Absolute paths are loaded directly. Relative paths (default
    /// [`DEFAULT_ENV_FILE`]) are searched for from the current directory
    /// upwards; see [`locate_env_file`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let name = path.unwrap_or_else(|| Path::new(DEFAULT_ENV_FILE));
        let resolved = if name.is_absolute() {
            name.to_path_buf()
        } else {
            locate_env_file(name, &current_dir()?)
        };

        let contents = read_config_file(&resolved)?;
        let mut source = Self::from_bytes(&contents).map_err(|e| match e {
                ConfigError::EnvParse { source, .. } => ConfigError::EnvParse {
                    path: resolved.clone(),
                    source,
                },
                other => other,
            })?;
        debug!(path = %resolved.display(), keys = source.values.len(), "loaded env file");
        source.path = Some(resolved);
        Ok(source)
    }

    /// Parses env-file content from any reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| parse_error(dotenvy::Error::Io(e)))?;
        Self::from_bytes(&bytes)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            parse_error(dotenvy::Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
        })?;

        let mut values = HashMap::new();
        for item in dotenvy::from_read_iter(escape_substitutions(text).as_bytes()) {
            let (key, raw) = item.map_err(parse_error)?;
            values.insert(key, coerce_value(&raw));
        }
        Ok(Self { path: None, values })
    }

    /// The file this source was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl ConfigSource for EnvFileSource {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

fn parse_error(source: dotenvy::Error) -> ConfigError {
    ConfigError::EnvParse {
        path: PathBuf::new(),
        source,
    }
}

/// Escapes every `$` that dotenvy would treat as a substitution.
///
/// Single-quoted text, comments and already escaped characters are copied
/// unchanged; quote tracking spans lines so multi-line values stay intact.
fn escape_substitutions(input: &str) -> String {
    #[derive(Clone, Copy, PartialEq)]
    enum Mode {
        Unquoted,
        Single,
        Double,
        Comment,
    }

    let mut out = String::with_capacity(input.len());
    let mut mode = Mode::Unquoted;
    let mut escaped = false;
    // start of line or after whitespace, where `#` opens a comment
    let mut after_blank = true;

    for c in input.chars() {
        if escaped {
            escaped = false;
        } else {
            match (mode, c) {
                (Mode::Comment, '\n') => mode = Mode::Unquoted,
                (Mode::Comment, _) => {}
                (Mode::Single, '\'') => mode = Mode::Unquoted,
                (Mode::Single, _) => {}
                (_, '\\') => escaped = true,
                (_, '$') => out.push('\\'),
                (Mode::Double, '"') => mode = Mode::Unquoted,
                (Mode::Unquoted, '"') => mode = Mode::Double,
                (Mode::Unquoted, '\'') => mode = Mode::Single,
                (Mode::Unquoted, '#') if after_blank => mode = Mode::Comment,
                _ => {}
            }
        }
        after_blank = mode == Mode::Unquoted && c.is_whitespace();
        out.push(c);
    }

    out
}

/// Finds `name` in `start` or its nearest ancestor directory.
///
/// Absolute names are returned unchanged. If no ancestor contains the file,
/// the result falls back to `start.join(name)` so that loading reports the
/// file as missing relative to the starting directory.
pub fn locate_env_file(name: &Path, start: &Path) -> PathBuf {
    if name.is_absolute() {
        return name.to_path_buf();
    }

    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(name);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "located env file");
            return candidate;
        }
        dir = current.parent();
    }

    start.join(name)
}

/// Converts raw env-file text into a typed value.
///
/// Surrounding whitespace is trimmed before classification. `true`/`false`
/// (any case) become booleans, integer and finite float literals become
/// numbers, and everything else is returned as the original string.
pub fn coerce_value(raw: &str) -> Value {
    let s = raw.trim();

    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }

    // f64 parsing also accepts "inf" and "NaN"; from_f64 rejects those
    if let Some(n) = s.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }

    Value::String(raw.to_string())
}
