use axum::{
    Form,
    extract::{FromRequest, Request, rejection::FormRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A `Form<T>` wrapper that converts decoding errors into `AppError::Validation`,
/// so malformed button posts get the same HTML error page as everything else.
pub struct AppForm<T>(pub T);

impl<S, T> FromRequest<S> for AppForm<T>
where
    Form<T>: FromRequest<S, Rejection = FormRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(AppForm(value))
    }
}
