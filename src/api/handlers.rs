//! HTTP API handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use time::OffsetDateTime;

use super::payload::Payload;
use crate::config::Config;
use crate::error::{ApiError, StoreError};
use crate::store::{parse_id, Item, ItemId, ItemPatch, ItemStore, NewItem};
use crate::utils;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The item collection.
    pub store: ItemStore,
    /// Loaded configuration.
    pub config: Arc<Config>,
    /// When the process started serving.
    pub started_at: Instant,
    /// Prometheus renderer, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(store: ItemStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
            started_at: Instant::now(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so /metrics can render.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Seconds since the state was created.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ItemStore::with_sample_items(), Config::default())
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: &'static str,
    /// Current time.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Process uptime in seconds.
    pub uptime: f64,
    /// Configured environment name.
    pub environment: String,
    /// Configured version.
    pub version: String,
}

/// Application info response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    /// Configured application name.
    pub application: String,
    /// Configured version.
    pub version: String,
    /// Configured environment name.
    pub environment: String,
    /// Runtime version; the key name is part of the wire contract.
    pub node_version: &'static str,
    /// Operating system identifier.
    pub platform: &'static str,
    /// Machine host name.
    pub hostname: String,
}

/// Item list envelope.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Always true.
    pub success: bool,
    /// Number of items in `data`.
    pub count: usize,
    /// Items in insertion order.
    pub data: Vec<Item>,
}

/// Single item envelope.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    /// Always true.
    pub success: bool,
    /// The item read, created, updated or removed.
    pub data: Item,
}

impl ItemResponse {
    fn ok(data: Item) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Health check handler - always returns 200.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: OffsetDateTime::now_utc(),
        uptime: state.uptime_secs(),
        environment: state.config.node_env.clone(),
        version: state.config.app_version.clone(),
    })
}

/// Info handler - static application and host metadata.
pub async fn info(State(state): State<AppState>) -> Json<InfoResponse> {
    Json(InfoResponse {
        application: state.config.app_name.clone(),
        version: state.config.app_version.clone(),
        environment: state.config.node_env.clone(),
        node_version: utils::RUSTC_VERSION,
        platform: utils::platform(),
        hostname: utils::hostname(),
    })
}

/// GET /api/items
pub async fn list_items(State(state): State<AppState>) -> Json<ListResponse> {
    let data = state.store.list().await;

    Json(ListResponse {
        success: true,
        count: data.len(),
        data,
    })
}

/// GET /api/items/:id
pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = item_id(&raw_id)?;
    let item = state.store.get(id).await?;
    Ok(ItemResponse::ok(item))
}

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Payload(new_item): Payload<NewItem>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = state.store.create(new_item).await?;
    Ok((StatusCode::CREATED, ItemResponse::ok(item)))
}

/// PUT /api/items/:id
pub async fn update_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Payload(patch): Payload<ItemPatch>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = item_id(&raw_id)?;
    let item = state.store.update(id, patch).await?;
    Ok(ItemResponse::ok(item))
}

/// DELETE /api/items/:id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = item_id(&raw_id)?;
    let item = state.store.delete(id).await?;
    Ok(ItemResponse::ok(item))
}

/// GET /metrics - Prometheus text format.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics.as_ref().ok_or(ApiError::RouteNotFound)?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}

/// Catch-all for unmatched routes and methods.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn item_id(raw: &str) -> Result<ItemId, StoreError> {
    parse_id(raw).ok_or_else(|| StoreError::InvalidId(raw.to_string()))
}
