use axum::{Router, routing::get, routing::post};

use crate::handlers::integration;
use crate::state::AppState;

pub fn page_routes(max_upload_size: u64) -> Router<AppState> {
    Router::new()
        .route("/", get(integration::index))
        .route(
            integration::PAGE_PATH,
            get(integration::show_page)
                .post(integration::upload_integration)
                .layer(integration::upload_body_limit(max_upload_size)),
        )
        .route("/integrations/{id}/rag", post(integration::set_rag_flag))
        .route(
            "/integrations/{id}/delete",
            post(integration::delete_integration),
        )
}
