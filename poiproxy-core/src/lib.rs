//! # POIProxy Core Library
//!
//! The configuration side of the POI proxy: every upstream point-of-interest
//! provider is described by a JSON document sitting in a directory on disk.
//!
//! ## Modules
//! - `config`: Registry settings (store directory, descriptor suffix).
//! - `error`: The [`RegistryError`] taxonomy.
//! - `model`: Service descriptors and request parameters.
//! - `parser`: Turns raw JSON text into a [`ServiceDescriptor`].
//! - `registry`: Scans the store and lazily parses descriptors by id.
//! - `params`: Optional request parameter extraction for HTTP handlers.
//! - `fs`: Recursive resource listing.

pub mod config;
pub mod error;
pub mod fs;
pub mod model;
pub mod params;
pub mod parser;
pub mod registry;

pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use model::{Param, ServiceDescriptor};
pub use params::{extract_params, OptionalParams};
pub use parser::{DescriptorParser, JsonDescriptorParser};
pub use registry::ServiceRegistry;
