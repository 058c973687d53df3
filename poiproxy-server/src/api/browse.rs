//! Browse resource.
//!
//! Validates the requested service and reports which optional parameters
//! the request carried. Upstream requests are not made here.

use super::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use log::info;
use poiproxy_core::OptionalParams;
use std::collections::HashMap;

/// Optional parameters understood when browsing a service.
pub struct BrowseResource;

impl OptionalParams for BrowseResource {
    fn optional_param_names(&self) -> &[&'static str] {
        &["query", "callback", "distance", "lon", "lat"]
    }
}

pub async fn browse(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let descriptor = match state.descriptor(&service_id).await {
        Ok(descriptor) => descriptor,
        Err(response) => return response,
    };

    let params = BrowseResource.extract_params(&query);
    info!("Browse '{}' with {} optional params", service_id, params.len());

    let request_types: Vec<&String> = descriptor.request_types.keys().collect();
    Json(serde_json::json!({
        "status": "OK",
        "service": service_id,
        "format": descriptor.format,
        "requestTypes": request_types,
        "params": params,
    }))
    .into_response()
}
