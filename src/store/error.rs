//! Errors raised by the recipe store.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::EntityKind;

/// Errors that can occur with the recipe store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("Failed to open database {}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Database {} has schema version {found}, but only version {supported} is supported", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: i64,
        supported: i64,
    },

    #[error("Database not open")]
    NotOpen,

    #[error("No {entity} with {key}")]
    NotFound { entity: EntityKind, key: String },

    #[error("Failed to find {kind} '{name}'")]
    FilterTermNotFound { kind: EntityKind, name: String },

    #[error("Failed to {operation} ({entity})")]
    Storage {
        operation: &'static str,
        entity: EntityKind,
        #[source]
        source: rusqlite::Error,
    },
}

impl StoreError {
    pub(crate) fn unavailable(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Unavailable {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// True for `NotFound` and `FilterTermNotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::FilterTermNotFound { .. })
    }
}

/// Attach operation context to a `rusqlite` result
pub(crate) trait StorageContext<T> {
    fn during(self, operation: &'static str, entity: EntityKind) -> Result<T, StoreError>;
}

impl<T> StorageContext<T> for rusqlite::Result<T> {
    fn during(self, operation: &'static str, entity: EntityKind) -> Result<T, StoreError> {
        self.map_err(|source| StoreError::Storage {
            operation,
            entity,
            source,
        })
    }
}
