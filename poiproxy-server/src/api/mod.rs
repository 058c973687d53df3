//! HTTP API over the service registry.
//!
//! The registry is shared behind a single mutex, so concurrent requests for
//! the same uncached service parse its document exactly once. Lookups that may
//! touch the disk run on the blocking pool.

mod browse;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use poiproxy_core::{RegistryError, ServiceDescriptor, ServiceRegistry};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;

// App State to share with routes
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Mutex<ServiceRegistry>>,
}

impl AppState {
    pub fn new(registry: ServiceRegistry) -> Self {
        Self {
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    fn registry(&self) -> MutexGuard<'_, ServiceRegistry> {
        lock(&self.registry)
    }

    /// Runs a registry operation that may read from disk off the async runtime.
    async fn with_registry<T, F>(&self, op: F) -> Result<T, Response>
    where
        F: FnOnce(&mut ServiceRegistry) -> T + Send + 'static,
        T: Send + 'static,
    {
        let registry = self.registry.clone();
        tokio::task::spawn_blocking(move || op(&mut lock(&registry)))
            .await
            .map_err(|e| {
                error!("API: registry task failed: {}", e);
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Registry task failed")
            })
    }

    /// Resolves a descriptor, turning registry failures into responses.
    async fn descriptor(&self, id: &str) -> Result<Arc<ServiceDescriptor>, Response> {
        let owned_id = id.to_string();
        let result = self
            .with_registry(move |registry| registry.get_descriptor(&owned_id))
            .await?;

        match result {
            Ok(Some(descriptor)) => Ok(descriptor),
            Ok(None) => Err(error_response(
                StatusCode::NOT_FOUND,
                format!("Service '{}' not found", id),
            )),
            Err(e @ RegistryError::MalformedDescriptor { .. }) => {
                error!("API: {}", e);
                Err(error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
            }
            Err(e) => {
                error!("API: {}", e);
                Err(error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
            }
        }
    }
}

fn lock(registry: &Mutex<ServiceRegistry>) -> MutexGuard<'_, ServiceRegistry> {
    // Registry state stays consistent even if a holder panicked.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/services", get(list_services))
        .route("/services/:service_id", get(get_service))
        .route("/services/:service_id/raw", get(get_service_raw))
        .route("/browse/:service_id", get(browse::browse))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_api_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!("API Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn error_response(status: StatusCode, msg: impl Into<String>) -> Response {
    let body = Json(serde_json::json!({"status": "ERROR", "msg": msg.into()}));
    (status, body).into_response()
}

async fn health_check() -> &'static str {
    "OK"
}

async fn list_services(State(state): State<AppState>) -> impl IntoResponse {
    let services = state.registry().service_ids();
    Json(serde_json::json!({"status": "OK", "services": services}))
}

async fn get_service(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Response {
    match state.descriptor(&service_id).await {
        Ok(descriptor) => {
            Json(serde_json::json!({"status": "OK", "id": service_id, "service": descriptor.as_ref()}))
                .into_response()
        }
        Err(response) => response,
    }
}

async fn get_service_raw(
    State(state): State<AppState>,
    Path(service_id): Path<String>,
) -> Response {
    let id = service_id.clone();
    let text = match state.with_registry(move |registry| registry.get_raw_text(&id)).await {
        Ok(text) => text,
        Err(response) => return response,
    };

    match text {
        Some(text) => ([(header::CONTENT_TYPE, "application/json")], text).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Service '{}' not found", service_id),
        ),
    }
}
