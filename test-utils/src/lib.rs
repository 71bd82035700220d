//!
//! # Test Utilities
//!
#![warn(missing_docs)]

use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;
use tempfile::{NamedTempFile, TempDir, TempPath};

/// Creates a path to a temporary file.
///
pub fn temp_path() -> std::io::Result<TempPath> {
    Ok(NamedTempFile::new()?.into_temp_path())
}

/// Creates a temporary directory, removed when the handle is dropped.
///
pub fn temp_dir() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}

/// Generates `len` random bytes.
///
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

/// Writes a file with the given name and content into `dir` and returns its
/// path.
///
pub fn write_input_file(dir: &Path, name: &str, content: &[u8]) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content)?;
    Ok(path)
}
