//! The service configuration registry.
//!
//! Every service the proxy can talk to is described by a JSON document in the
//! descriptor store. The registry scans the store once, remembering which file
//! belongs to which service id, and only reads and parses a document the first
//! time its descriptor is asked for. Parsed descriptors are kept for the life
//! of the registry.
//!
//! Adding a service therefore means dropping `<id>.json` into the store and
//! rescanning (or calling [`ServiceRegistry::register`]).

pub mod catalog;
pub mod disk;

use crate::config::RegistryConfig;
use crate::error::{RegistryError, Result};
use crate::model::ServiceDescriptor;
use crate::parser::{DescriptorParser, JsonDescriptorParser};
use catalog::DescriptorCatalog;
use disk::DescriptorStore;
use log::{debug, error, info};
use std::collections::HashMap;
use std::sync::Arc;

/// Maps service ids to their descriptor files and parsed descriptors.
///
/// Lookups that fill the cache take `&mut self`; share the registry behind a
/// lock to use it from several threads.
pub struct ServiceRegistry<P = JsonDescriptorParser> {
    store: DescriptorStore,
    /// Service id -> file name inside the store.
    registered: HashMap<String, String>,
    parsed: DescriptorCatalog,
    parser: P,
}

impl ServiceRegistry<JsonDescriptorParser> {
    /// Creates an empty registry over `config.directory`.
    ///
    /// Nothing is read from disk until [`scan`](Self::scan) is called.
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_parser(config, JsonDescriptorParser::new())
    }

    /// Creates a registry and scans its store right away.
    pub fn load(config: RegistryConfig) -> Self {
        let mut registry = Self::new(config);
        registry.scan();
        registry
    }
}

impl<P: DescriptorParser> ServiceRegistry<P> {
    pub fn with_parser(config: RegistryConfig, parser: P) -> Self {
        Self {
            store: DescriptorStore::new(config),
            registered: HashMap::new(),
            parsed: DescriptorCatalog::new(),
            parser,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        self.store.config()
    }

    /// Registers every descriptor file found in the store.
    ///
    /// Existing registrations are overwritten, never removed. Parsed
    /// descriptors are left untouched. A missing store registers nothing.
    ///
    /// # Returns
    ///
    /// The number of files registered by this scan.
    pub fn scan(&mut self) -> usize {
        let found = self.store.scan();
        let count = found.len();
        for (id, file_name) in found {
            info!("Registry: registering {}", file_name.to_lowercase());
            self.register(id, file_name);
        }
        count
    }

    /// Registers (or re-points) a service id to a file of the store.
    ///
    /// The file is not checked for existence.
    pub fn register(&mut self, id: impl Into<String>, file_name: impl Into<String>) {
        self.registered.insert(id.into(), file_name.into());
    }

    /// The id -> file name map of every registered service.
    pub fn registered_configurations(&self) -> &HashMap<String, String> {
        &self.registered
    }

    /// Registered service ids, sorted.
    pub fn service_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.registered.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn is_parsed(&self, id: &str) -> bool {
        self.parsed.contains(id)
    }

    /// Reads the document registered under `id`.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` with the whole document.
    /// * `Err(NotFound)` if the id is not registered.
    /// * `Err(Io)` if the file could not be read.
    pub fn read_raw(&self, id: &str) -> Result<String> {
        let file_name = self
            .registered
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        self.store.read(file_name).map_err(|source| RegistryError::Io {
            id: id.to_string(),
            path: self.store.path_of(file_name),
            source,
        })
    }

    /// Returns the raw document of a service, or `None` if it is not
    /// registered or cannot be read. Read failures are logged.
    pub fn get_raw_text(&self, id: &str) -> Option<String> {
        match self.read_raw(id) {
            Ok(text) => Some(text),
            Err(RegistryError::NotFound(_)) => {
                debug!("Registry: no service registered as '{}'", id);
                None
            }
            Err(e) => {
                error!("Registry: {}", e);
                None
            }
        }
    }

    /// Returns the descriptor of a service, parsing it on first use.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(_))` with the cached descriptor. Repeated calls return the
    ///   same instance.
    /// * `Ok(None)` if the service is unknown or its document is unreadable.
    ///   Nothing is cached, so a later call tries again.
    /// * `Err(MalformedDescriptor)` if the document does not parse. Nothing
    ///   is cached either.
    pub fn get_descriptor(&mut self, id: &str) -> Result<Option<Arc<ServiceDescriptor>>> {
        if let Some(descriptor) = self.parsed.get(id) {
            return Ok(Some(descriptor));
        }

        let Some(text) = self.get_raw_text(id) else {
            return Ok(None);
        };

        let descriptor = self
            .parser
            .parse(&text)
            .map_err(|e| RegistryError::malformed(id, format!("{:#}", e)))?;

        debug!("Registry: parsed descriptor for '{}'", id);
        Ok(Some(self.parsed.insert(id, descriptor)))
    }

    /// Fetching descriptors from a URL is not supported.
    pub fn get_remote_configuration(&self, url: &str) -> Result<Arc<ServiceDescriptor>> {
        debug!("Registry: remote configuration requested from {}", url);
        Err(RegistryError::NotImplemented("Remote service configuration"))
    }
}
