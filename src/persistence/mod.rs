//! Save/load of small JSON documents
//!
//! Highscores and settings are each kept in one JSON file under the data
//! directory. Loading is allowed to fail; callers fall back to defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Directory the game keeps its files in
pub const DATA_DIR: &str = "data";

/// Location of a named file inside the data directory
pub fn data_path(file_name: &str) -> PathBuf {
    Path::new(DATA_DIR).join(file_name)
}

#[derive(Debug)]
pub enum PersistError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl PersistError {
    /// The file does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Json { path, source } => {
                write!(f, "{}: malformed JSON: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a value as pretty JSON, creating the parent directory if needed.
///
/// The document goes to a temporary sibling first and is then renamed over
/// the target, so a crash mid-write leaves the old file intact.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    let io_err = |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("the-rng-{}-{}-{}", name, std::process::id(), n));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_creates_parent() {
        let dir = scratch_dir("persist");
        let path = dir.join("nested").join("values.json");

        save_json(&path, &vec![3u64, 2, 1]).unwrap();
        let loaded: Vec<u64> = load_json(&path).unwrap();
        assert_eq!(loaded, vec![3, 2, 1]);
        assert!(!path.with_extension("tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = scratch_dir("missing");
        let err = load_json::<Vec<u64>>(&dir.join("nope.json")).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_garbage_is_json_error() {
        let dir = scratch_dir("garbage");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        fs::write(&path, "not json {").unwrap();

        let err = load_json::<Vec<u64>>(&path).unwrap_err();
        assert!(matches!(err, PersistError::Json { .. }));
        assert!(err.to_string().contains("malformed JSON"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_data_path() {
        assert_eq!(data_path("x.json"), Path::new("data").join("x.json"));
    }
}
