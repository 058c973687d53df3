//! Settings of the service configuration registry.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory scanned for service descriptors when nothing else is configured.
pub const DEFAULT_CONFIGURATION_DIR: &str = "/var/lib/services";

/// File name suffix identifying descriptor documents.
pub const DEFAULT_DESCRIPTOR_SUFFIX: &str = ".json";

/// Where the registry looks for descriptors and how it recognises them.
///
/// The registry owns its copy; there is no process-wide default path.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// The descriptor store. One `<service_id><suffix>` file per service.
    pub directory: PathBuf,

    /// Suffix a file name must end with to be registered.
    pub suffix: String,
}

impl RegistryConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_CONFIGURATION_DIR),
            suffix: DEFAULT_DESCRIPTOR_SUFFIX.to_string(),
        }
    }
}
