//! Descriptor parsing.
//!
//! The registry only needs "text in, descriptor out", so the parser sits
//! behind [`DescriptorParser`]. [`JsonDescriptorParser`] is the stock one.

use crate::model::ServiceDescriptor;
use anyhow::{bail, Context, Result};

/// Turns the raw text of a service document into a [`ServiceDescriptor`].
///
/// Implementations must be deterministic: the same text always yields an
/// equivalent descriptor.
pub trait DescriptorParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<ServiceDescriptor>;
}

/// Parses descriptor documents with `serde_json` and checks the parts of the
/// schema the proxy cannot work without.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonDescriptorParser;

impl JsonDescriptorParser {
    pub fn new() -> Self {
        Self
    }
}

impl DescriptorParser for JsonDescriptorParser {
    fn parse(&self, text: &str) -> Result<ServiceDescriptor> {
        let descriptor: ServiceDescriptor =
            serde_json::from_str(text).context("Invalid service document")?;

        if descriptor.request_types.is_empty() {
            bail!("'requestTypes' must declare at least one request type");
        }

        for (name, request) in &descriptor.request_types {
            if request.url.trim().is_empty() {
                bail!("Request type '{}' has an empty url", name);
            }
        }

        Ok(descriptor)
    }
}
