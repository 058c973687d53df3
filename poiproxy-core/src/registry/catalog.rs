//! In-memory cache of parsed service descriptors.
//!
//! It is PURE data. It does not do I/O.

use crate::model::ServiceDescriptor;
use std::collections::HashMap;
use std::sync::Arc;

/// Parsed descriptors keyed by service id.
///
/// Entries are never evicted or replaced: the first descriptor stored for an
/// id is the one every later lookup returns.
#[derive(Debug, Default, Clone)]
pub struct DescriptorCatalog {
    descriptors: HashMap<String, Arc<ServiceDescriptor>>,
}

impl DescriptorCatalog {
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<ServiceDescriptor>> {
        self.descriptors.get(id).cloned()
    }

    /// Stores a descriptor unless one is already cached for `id`.
    ///
    /// Returns the cached instance in both cases.
    pub fn insert(&mut self, id: &str, descriptor: ServiceDescriptor) -> Arc<ServiceDescriptor> {
        self.descriptors
            .entry(id.to_string())
            .or_insert_with(|| Arc::new(descriptor))
            .clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.descriptors.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
