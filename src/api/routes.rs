//! Router construction

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers;
use crate::AppState;

/// Build the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/backgrounds", get(handlers::list_backgrounds))
        .route("/api/session", get(handlers::get_session))
        .route("/api/session/face", post(handlers::upload_face))
        .route("/api/session/garment", post(handlers::upload_garment))
        .route("/api/session/background", put(handlers::select_background))
        .route("/api/session/addendum", put(handlers::set_addendum))
        .route("/api/session/posing", put(handlers::set_posing))
        .route("/api/session/generate", post(handlers::generate))
        .route("/api/session/clear", post(handlers::clear))
        .route("/api/session/result", get(handlers::download_result))
        // Uploads carry whole photos and are not size limited
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
