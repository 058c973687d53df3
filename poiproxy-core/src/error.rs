use std::path::PathBuf;
use thiserror::Error;

/// Failures of the service configuration registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No descriptor file is registered under this id.
    #[error("Service '{0}' is not registered")]
    NotFound(String),

    /// The descriptor file is registered but could not be read.
    #[error("Failed to read descriptor for '{id}' at {path}: {source}")]
    Io {
        id: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document was read but does not describe a valid service.
    #[error("Malformed descriptor for '{id}': {reason}")]
    MalformedDescriptor { id: String, reason: String },

    /// The operation exists in the API but has no implementation.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

impl RegistryError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDescriptor {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Whether the caller should see this as a plain "absent" result.
    ///
    /// Missing ids and unreadable files are both reported as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Io { .. })
    }
}

/// A specialized Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
