//! Log export reader with path validation and automatic decompression.
//!
//! Only files named `*.log` are accepted. Exports archived as `*.log.gz`
//! or `*.log.zst` are decompressed transparently while reading, so an
//! operator can point the tool straight at a rotated archive.
//!
//! # Examples
//!
//! ```no_run
//! use fwlog_inspector::utils::reader::read_log_file;
//!
//! let text = read_log_file("exports/firewall.log.gz").unwrap();
//! println!("{} bytes", text.len());
//! ```

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// A log path that cannot be loaded. Every variant is recoverable by
/// asking for another path.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("file not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("invalid file format: {} is not a .log file", .path.display())]
    InvalidExtension { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    None,
    Gzip,
    Zstd,
}

/// Classify a path by suffix, returning `None` for anything that is not a
/// (possibly compressed) `.log` file. Matching is case-insensitive.
fn compression_for(path: &Path) -> Option<Compression> {
    let name = path.file_name()?.to_str()?.to_ascii_lowercase();
    if name.ends_with(".log") {
        Some(Compression::None)
    } else if name.ends_with(".log.gz") {
        Some(Compression::Gzip)
    } else if name.ends_with(".log.zst") {
        Some(Compression::Zstd)
    } else {
        None
    }
}

/// Check that a path names a `.log` export (optionally `.gz`/`.zst`).
pub fn validate_log_path(path: impl AsRef<Path>) -> Result<(), InputError> {
    let path = path.as_ref();
    compression_for(path)
        .map(|_| ())
        .ok_or_else(|| InputError::InvalidExtension {
            path: path.to_path_buf(),
        })
}

/// Opens a log export, wrapping it in a decoder when it is compressed.
pub fn open_file(path: impl AsRef<Path>) -> Result<Box<dyn Read>, InputError> {
    let path = path.as_ref();
    let compression = compression_for(path).ok_or_else(|| InputError::InvalidExtension {
        path: path.to_path_buf(),
    })?;

    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    match compression {
        Compression::Gzip => Ok(Box::new(GzDecoder::new(file))),
        Compression::Zstd => {
            let decoder = zstd::Decoder::new(file).map_err(|source| InputError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(Box::new(decoder))
        }
        Compression::None => Ok(Box::new(file)),
    }
}

/// Read a whole log export into memory.
pub fn read_log_file(path: impl AsRef<Path>) -> Result<String, InputError> {
    let path = path.as_ref();
    let mut reader = open_file(path)?;
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), bytes = text.len(), "read log export");
    Ok(text)
}
