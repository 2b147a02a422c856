//! Error handling for KitchenKit
//!
//! Layout operations themselves never fail: invalid geometry is clamped and
//! collisions are silent no-ops. The error types here cover the edges of the
//! engine instead:
//! - Catalog errors (feed parsing, unknown types)
//! - Storage errors (key-value persistence)
//! - Layout errors (addressing walls or instances that do not exist)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Catalog error type
///
/// Raised while reading the catalog feed or resolving a module type against it.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// The catalog feed could not be parsed
    #[error("Invalid catalog feed: {reason}")]
    InvalidFeed {
        /// The reason the feed was rejected.
        reason: String,
    },

    /// No entry exists for the requested module type
    #[error("Unknown module type: {module_type}")]
    UnknownType {
        /// The module type that was looked up.
        module_type: String,
    },

    /// The same module type appears twice in one feed
    #[error("Duplicate module type in catalog: {module_type}")]
    DuplicateType {
        /// The repeated module type.
        module_type: String,
    },
}

/// Storage error type
///
/// Represents failures of the key-value store backing per-wall persistence.
#[derive(Error, Debug)]
pub enum StorageError {
    /// A key contains characters that cannot be mapped to the backend
    #[error("Invalid storage key: {key}")]
    InvalidKey {
        /// The rejected key.
        key: String,
    },

    /// A stored value could not be decoded
    #[error("Corrupted value under {key}: {reason}")]
    Corrupted {
        /// The key holding the value.
        key: String,
        /// The decoding failure.
        reason: String,
    },

    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Layout error type
///
/// Raised when a caller addresses a wall or instance that does not exist.
/// Rejected placements and moves are not errors.
#[derive(Error, Debug, Clone)]
pub enum LayoutError {
    /// No wall with this id in the project
    #[error("Wall not found: {wall_id}")]
    WallNotFound {
        /// The missing wall id.
        wall_id: String,
    },

    /// No instance with this id on the wall
    #[error("Module instance not found: {instance_id}")]
    InstanceNotFound {
        /// The missing instance id.
        instance_id: String,
    },

    /// The kitchen type name is not one of the known presets
    #[error("Unknown kitchen type: {name}")]
    UnknownKitchenType {
        /// The unrecognised name.
        name: String,
    },
}

/// Main error type for KitchenKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Storage error
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a catalog error
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, Error::Catalog(_))
    }

    /// Check if this is a storage error
    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if this error means a wall or instance was not found
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Layout(LayoutError::WallNotFound { .. })
                | Error::Layout(LayoutError::InstanceNotFound { .. })
                | Error::Catalog(CatalogError::UnknownType { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::UnknownType {
            module_type: "bm2p".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown module type: bm2p");

        let err = LayoutError::WallNotFound {
            wall_id: "left".to_string(),
        };
        assert_eq!(err.to_string(), "Wall not found: left");

        let err = StorageError::InvalidKey {
            key: "../etc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid storage key: ../etc");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = LayoutError::InstanceNotFound {
            instance_id: "abc".to_string(),
        }
        .into();
        assert!(err.is_not_found());
        assert!(!err.is_catalog_error());

        let err: Error = CatalogError::InvalidFeed {
            reason: "eof".to_string(),
        }
        .into();
        assert!(err.is_catalog_error());
        assert_eq!(err.to_string(), "Invalid catalog feed: eof");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = StorageError::from(io_err).into();
        assert!(err.is_storage_error());
    }
}
