//! # Design Downloads
//!
//! Saves a fetched design under a fixed file name with atomic write
//! semantics:
//! 1. Write the bytes to a uniquely named temporary file in the same directory
//! 2. Sync to disk (fsync)
//! 3. Rename over `vasthra-design.png`
//!
//! Each save owns its temporary file, so overlapping downloads never write
//! into each other's file; the last rename wins. The temporary file is
//! removed if any step fails.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vasthra_core::download::{default_download_dir, save_design};
//!
//! let path = save_design(b"png bytes", &default_download_dir())?;
//! println!("Saved to {}", path.display());
//! # Ok::<(), vasthra_core::errors::VasthraError>(())
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::config::ServiceConfig;
use crate::errors::{VasthraError, VasthraResult};

/// File name every downloaded design is saved as
pub const DESIGN_FILE_NAME: &str = "vasthra-design.png";

/// The user's download directory, else the current directory
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Download directory for a config: its override, else the default
pub fn download_dir_for(config: &ServiceConfig) -> PathBuf {
    config
        .download_dir
        .clone()
        .unwrap_or_else(default_download_dir)
}

/// Write a design into `dir` as [`DESIGN_FILE_NAME`], replacing any
/// previous download. Returns the final path.
pub fn save_design(bytes: &[u8], dir: &Path) -> VasthraResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        VasthraError::file_error("create download dir", dir.display().to_string(), e.to_string())
    })?;

    let path = dir.join(DESIGN_FILE_NAME);

    // Dropping the temp file on any error path deletes it
    let mut tmp = NamedTempFile::with_prefix_in(".vasthra-design-", dir).map_err(|e| {
        VasthraError::file_error("create temp file", dir.display().to_string(), e.to_string())
    })?;

    tmp.write_all(bytes).map_err(|e| {
        VasthraError::file_error("write temp file", tmp.path().display().to_string(), e.to_string())
    })?;

    tmp.as_file().sync_all().map_err(|e| {
        VasthraError::file_error("sync temp file", tmp.path().display().to_string(), e.to_string())
    })?;

    tmp.persist(&path).map_err(|e| {
        VasthraError::file_error("rename to final", path.display().to_string(), e.error.to_string())
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "Design saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_uses_fixed_name() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_design(b"design", dir.path()).unwrap();

        assert_eq!(path, dir.path().join("vasthra-design.png"));
        assert_eq!(fs::read(&path).unwrap(), b"design");
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_design(b"design", dir.path()).unwrap();

        assert!(path.exists());
        assert_eq!(dir_entries(dir.path()), vec![DESIGN_FILE_NAME.to_string()]);
    }

    #[test]
    fn test_overlapping_saves_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let first = vec![b'a'; 256 * 1024];
        let second = vec![b'b'; 256 * 1024];

        std::thread::scope(|scope| {
            let workers: Vec<_> = [&first, &second]
                .into_iter()
                .map(|bytes| {
                    let dir = dir.path();
                    scope.spawn(move || {
                        for _ in 0..20 {
                            save_design(bytes, dir).unwrap();
                        }
                    })
                })
                .collect();
            for worker in workers {
                worker.join().unwrap();
            }
        });

        // The published file is always one complete download, never a mix
        let saved = fs::read(dir.path().join(DESIGN_FILE_NAME)).unwrap();
        assert!(saved == first || saved == second);
        assert_eq!(dir_entries(dir.path()), vec![DESIGN_FILE_NAME.to_string()]);
    }

    #[test]
    fn test_second_download_replaces_first() {
        let dir = tempfile::tempdir().unwrap();

        save_design(b"first", dir.path()).unwrap();
        let path = save_design(b"second", dir.path()).unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_missing_dir_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("designs").join("batik");

        let path = save_design(b"design", &nested).unwrap();
        assert!(path.starts_with(&nested));
    }

    #[test]
    fn test_download_dir_override() {
        let config = ServiceConfig {
            download_dir: Some(PathBuf::from("/srv/designs")),
            ..ServiceConfig::default()
        };
        assert_eq!(download_dir_for(&config), PathBuf::from("/srv/designs"));
    }
}
