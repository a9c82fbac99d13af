use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::DbErr;

use crate::service::IntegrationError;
use crate::views::error_page;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".into(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Html(error_page(status, &message))).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<minijinja::Error> for AppError {
    fn from(err: minijinja::Error) -> Self {
        AppError::Internal(format!("Template rendering failed: {err}"))
    }
}

impl From<IntegrationError> for AppError {
    fn from(err: IntegrationError) -> Self {
        match err {
            IntegrationError::Validation(msg) => AppError::Validation(msg),
            IntegrationError::NotFound(id) => {
                AppError::NotFound(format!("Integration {id} not found"))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
