//! Structured form of a service description document.
//!
//! A document tells the proxy how to query one upstream POI provider
//! (`requestTypes`) and how to read the features it answers with
//! (`featureTypes`). Keys are camelCase on disk.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_format() -> String {
    "json".to_string()
}

fn default_encoding() -> String {
    "UTF-8".to_string()
}

/// A parsed service descriptor.
///
/// Once handed out by the registry it is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    /// Response format of the upstream service (e.g. "json", "xml").
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Text encoding of the upstream responses.
    #[serde(default = "default_encoding")]
    pub encoding: String,

    #[serde(default)]
    pub categories: Vec<String>,

    /// Maps a request kind (e.g. "browseByExtent") to its endpoint.
    pub request_types: BTreeMap<String, RequestType>,

    /// Maps a response format to the fields holding feature data.
    #[serde(default)]
    pub feature_types: BTreeMap<String, FeatureType>,
}

impl ServiceDescriptor {
    pub fn request_type(&self, name: &str) -> Option<&RequestType> {
        self.request_types.get(name)
    }

    /// The feature type matching the descriptor's own response format.
    pub fn feature_type(&self) -> Option<&FeatureType> {
        self.feature_types.get(&self.format)
    }
}

/// One way of querying the upstream service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestType {
    /// URL template with `__PARAM__` style placeholders.
    pub url: String,

    #[serde(default)]
    pub params: Vec<String>,
}

/// Where point data lives inside an upstream response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureType {
    /// Path of the element that starts a new feature.
    #[serde(default)]
    pub feature: String,

    /// Attribute elements copied onto each feature.
    #[serde(default)]
    pub elements: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,

    /// Longitude and latitude come in a single element.
    #[serde(default)]
    pub combined_lon_lat: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon_lat_separator: Option<String>,
}
