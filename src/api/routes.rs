//! HTTP API route definitions.

use std::any::Any;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use super::handlers::{
    create_item, delete_item, get_item, health, info, list_items, metrics, not_found,
    update_item, AppState,
};
use crate::error::ApiError;
use crate::metrics::LatencyTimer;

/// Create the API router.
///
/// Every path also matches with a trailing slash (`/api/items/`).
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new();
    // Diagnostics
    let routes = route_both(routes, "/health", get(health));
    let routes = route_both(routes, "/api/info", get(info));
    let routes = route_both(routes, "/metrics", get(metrics));
    // Items
    let routes = route_both(routes, "/api/items", get(list_items).post(create_item));
    let routes = route_both(
        routes,
        "/api/items/:id",
        get(get_item).put(update_item).delete(delete_item),
    );

    let routes = routes
        .route_layer(middleware::from_fn(track_latency))
        .fallback(not_found)
        .with_state(state);

    apply_layers(routes)
}

/// Register `path` and `path/`, answering unsupported methods with "Route not found".
fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    let method_router = method_router.fallback(not_found);

    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

/// Shared middleware: panic boundary, CORS, access logging.
fn apply_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Record request latency labelled with the matched route template.
async fn track_latency(request: Request, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let _timer = LatencyTimer::new(request.method().as_str(), route);

    next.run(request).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}
