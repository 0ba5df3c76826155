//! Storage Layer
//!
//! Filesystem access for map files, downloaded map bitmaps and the config
//! file. Everything goes through `LocalStorage` so paths resolve against one
//! base directory and errors come back as `StorageError`.

pub mod local;

pub use local::LocalStorage;
use std::fmt;

/// Storage error types
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// File or directory not found
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// I/O error
    IoError(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::NotFound(path) => write!(f, "not found: {}", path),
            StorageError::PermissionDenied(msg) => write!(f, "permission denied: {}", msg),
            StorageError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::IoError(e.to_string()),
        }
    }
}
