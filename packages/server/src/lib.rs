pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod utils;
pub mod views;

use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let max_upload_size = state.service.max_upload_size();

    routes::page_routes(max_upload_size)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
