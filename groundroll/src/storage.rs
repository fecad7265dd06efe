//! Persistence for synthesized gathers.
//!
//! The core only needs a lossless round-trip of a dense `f64` matrix with its
//! shape. [`NpyStore`] writes NumPy `.npy` files so downstream Python tooling
//! can load artifacts with `np.load` unchanged.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::{ReadNpyError, ReadNpyExt, WriteNpyError, WriteNpyExt};
use thiserror::Error;

/// Errors that can occur while storing or loading a gather.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write npy array: {0}")]
    Write(#[from] WriteNpyError),
    #[error("Failed to read npy array: {0}")]
    Read(#[from] ReadNpyError),
}

impl StorageError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Store and load 2-D gathers.
///
/// Implementations must be shareable across threads; the parallel sweep
/// writes distinct destinations concurrently through one store.
pub trait MatrixStore: Sync {
    /// Persist `matrix` at `destination`, creating parent directories as needed.
    fn store(&self, matrix: &Array2<f64>, destination: &Path) -> Result<(), StorageError>;

    /// Load a matrix previously written by [`MatrixStore::store`].
    fn load(&self, path: &Path) -> Result<Array2<f64>, StorageError>;
}

/// NumPy `.npy` backed store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpyStore;

impl MatrixStore for NpyStore {
    fn store(&self, matrix: &Array2<f64>, destination: &Path) -> Result<(), StorageError> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let file = File::create(destination).map_err(|e| StorageError::io(destination, e))?;
        let mut writer = BufWriter::new(file);
        matrix.write_npy(&mut writer)?;
        writer
            .flush()
            .map_err(|e| StorageError::io(destination, e))?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Array2<f64>, StorageError> {
        let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
        let matrix = Array2::<f64>::read_npy(BufReader::new(file))?;
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SynthesisParameters;
    use crate::synthesis::synthesize_gather;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_is_exact() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gather.npy");
        let params = SynthesisParameters::default().with_dimensions(40, 800);
        let gather = synthesize_gather(&params).unwrap();

        NpyStore.store(&gather.data, &path).unwrap();
        let loaded = NpyStore.load(&path).unwrap();

        assert_eq!(loaded.dim(), (800, 40));
        assert_eq!(loaded, gather.data);
    }

    #[test]
    fn test_store_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("deeper").join("g.npy");
        let matrix = Array2::from_shape_fn((4, 3), |(r, c)| (r * 3 + c) as f64 * 0.25);

        NpyStore.store(&matrix, &path).unwrap();

        assert!(path.exists());
        assert_eq!(NpyStore.load(&path).unwrap(), matrix);
    }

    #[test]
    fn test_store_into_file_parent_fails() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let matrix = Array2::<f64>::zeros((2, 2));

        let result = NpyStore.store(&matrix, &blocker.join("g.npy"));

        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = NpyStore.load(&temp_dir.path().join("missing.npy"));
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }

    #[test]
    fn test_load_rejects_non_npy() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("garbage.npy");
        std::fs::write(&path, b"definitely not numpy").unwrap();

        assert!(matches!(
            NpyStore.load(&path),
            Err(StorageError::Read(_))
        ));
    }
}
