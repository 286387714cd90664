//! Reading configuration files from disk.

use std::path::{Path, PathBuf};

use super::ConfigError;

/// Reads a config file into memory.
///
/// A missing file maps to [`ConfigError::FileNotFound`]; any other I/O
/// failure maps to [`ConfigError::ReadError`]. Content is returned as raw
/// bytes so that each format reports bad encoding as malformed content.
pub fn read_config_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

pub fn current_dir() -> Result<PathBuf, ConfigError> {
    std::env::current_dir().map_err(ConfigError::CurrentDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "KEY=value").unwrap();

        let contents = read_config_file(file.path()).unwrap();
        assert_eq!(contents, b"KEY=value\n");
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_config_file(Path::new("/nonexistent/path/.env"));

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_read_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config_file(dir.path());

        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
