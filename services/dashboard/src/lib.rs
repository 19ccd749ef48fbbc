pub mod analysis;
pub mod config;
pub mod render;
pub mod routes_api;
pub mod routes_dashboard;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::SharedState;

pub fn router(state: SharedState) -> Router {
    let mut app = Router::new()
        .route("/", get(routes_dashboard::index))
        .route("/analyze/upload", post(routes_dashboard::upload))
        .route("/analyze/text", post(routes_dashboard::classify_text_form))
        .route("/api/reviews/upload", post(routes_api::upload))
        .route("/api/reviews/classify", post(routes_api::classify))
        .route("/api/model", get(routes_api::model_info))
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(state.cfg.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    if state.cfg.cors_permissive {
        app = app.layer(CorsLayer::permissive());
    }

    app.with_state(state)
}
