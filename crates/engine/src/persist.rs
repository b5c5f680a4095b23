//! JSON file helpers shared by the ledger and snapshot stores.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;

/// Read and parse `path`. Returns `Ok(None)` when the file does not exist.
pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Replace `path` with the pretty-printed JSON of `value`.
///
/// The payload is written to a sibling `.tmp` file first and then renamed
/// over the target, so readers never see a half-written document.
pub(crate) fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)?;

    let tmp = path.with_extension("tmp");
    {
        let mut file = private_file(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
    }
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(&tmp, path)?;
            let _ = fs::remove_file(&tmp);
            Ok(())
        }
    }
}

/// Create the parent directory of `path` (owner-only on Unix).
pub(crate) fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new()
            .recursive(true)
            .mode(0o700)
            .create(parent)
    }
    #[cfg(not(unix))]
    {
        fs::create_dir_all(parent)
    }
}

fn private_file(path: &Path) -> io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let value: Option<Vec<u32>> = read_json_file(&dir.path().join("absent.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn write_creates_directories_and_leaves_no_tmp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/data/values.json");
        write_json_file(&path, &vec![1.25_f64, 0.1]).unwrap();

        let back: Option<Vec<f64>> = read_json_file(&path).unwrap();
        assert_eq!(back, Some(vec![1.25, 0.1]));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn garbage_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = read_json_file(&path);
        assert!(matches!(result, Err(StorageError::Json(_))));
    }
}
