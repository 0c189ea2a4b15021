//! Input and output data exchange with the filesystem.
//!
//! The harness is agnostic to data provenance: input matrices are normally
//! generated from the configured seed, but A and B may instead be loaded
//! from raw little-endian f32 files of exactly the expected byte size.
//! Output dumps use the same raw format so external tools can compare the
//! computed result against their own.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::matrix::Matrix;

/// Filesystem-facing failures of the data interface.
#[derive(Debug)]
pub enum DataError {
    /// Underlying read/write failure.
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The file exists but holds the wrong number of bytes.
    SizeMismatch {
        /// File involved.
        path: PathBuf,
        /// Byte size the dimensions require.
        expected: u64,
        /// Byte size found on disk.
        actual: u64,
    },
    /// A bounded wait elapsed before the file reached the wanted size.
    Timeout {
        /// File waited on.
        path: PathBuf,
        /// Byte size waited for.
        want: u64,
        /// How long the wait lasted.
        waited: Duration,
    },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Io { path, source } => {
                write!(f, "{}: {}", path.display(), source)
            }
            DataError::SizeMismatch {
                path,
                expected,
                actual,
            } => write!(
                f,
                "{}: expected {} bytes, found {}",
                path.display(),
                expected,
                actual
            ),
            DataError::Timeout { path, want, waited } => write!(
                f,
                "{}: did not reach {} bytes within {:?}",
                path.display(),
                want,
                waited
            ),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load a `rows × cols` matrix from a raw little-endian f32 file.
///
/// The file must hold exactly `rows * cols * 4` bytes; short or long files
/// are rejected rather than silently truncated or padded.
pub fn load_matrix(path: &Path, rows: usize, cols: usize) -> Result<Matrix, DataError> {
    let expected = (rows * cols * std::mem::size_of::<f32>()) as u64;
    let bytes = fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.len() as u64 != expected {
        return Err(DataError::SizeMismatch {
            path: path.to_path_buf(),
            expected,
            actual: bytes.len() as u64,
        });
    }

    let data = bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect();
    Ok(Matrix::from_vec(data, rows, cols))
}

/// Dump a flat f32 payload as raw little-endian bytes.
pub fn write_payload(path: &Path, data: &[f32]) -> Result<(), DataError> {
    let mut bytes = Vec::with_capacity(data.len() * std::mem::size_of::<f32>());
    for v in data {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    fs::write(path, bytes).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Wait until `path` holds at least `want` bytes, bounded by `timeout`.
///
/// Polls at `interval` granularity. The file is checked once before any
/// sleep, so an already-complete file returns immediately even with a zero
/// timeout.
pub fn wait_for_file(
    path: &Path,
    want: u64,
    timeout: Duration,
    interval: Duration,
) -> Result<(), DataError> {
    let start = Instant::now();
    loop {
        if let Ok(meta) = fs::metadata(path) {
            if meta.len() >= want {
                return Ok(());
            }
        }

        let waited = start.elapsed();
        if waited >= timeout {
            return Err(DataError::Timeout {
                path: path.to_path_buf(),
                want,
                waited,
            });
        }
        std::thread::sleep(interval.min(timeout - waited));
    }
}
