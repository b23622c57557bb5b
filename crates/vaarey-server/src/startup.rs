use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::routes;
use crate::state::AppState;

/// Build the API router. The dashboard is served from another origin, so
/// every route sits behind a permissive GET-only CORS layer.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/api/forecast", get(routes::forecast::forecast))
        .route("/api/stats", get(routes::stats::stats))
        .route("/api/cities", get(routes::cities::list))
        .with_state(Arc::new(state))
        .layer(cors)
}
