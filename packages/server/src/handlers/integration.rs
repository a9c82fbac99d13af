use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::{error, instrument, warn};

use crate::error::AppError;
use crate::extractors::form::AppForm;
use crate::extractors::query::AppQuery;
use crate::models::integration::{Notice, PageQuery, PageView, RagForm, UploadFormValues};
use crate::service::{IntegrationError, SpecFile, UploadRequest};
use crate::state::AppState;

pub const PAGE_PATH: &str = "/integrations";

/// Multipart framing and the text fields on top of the file itself.
const FORM_OVERHEAD: usize = 64 * 1024;

pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    let max = usize::try_from(max_upload_size).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(max.saturating_add(FORM_OVERHEAD))
}

pub async fn index() -> Redirect {
    Redirect::to(PAGE_PATH)
}

/// Render the form and the full listing.
#[instrument(skip(state))]
pub async fn show_page(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Html<String>, AppError> {
    let records = state.service.list().await?;

    let notice = query.uploaded.and_then(|id| {
        records.iter().find(|r| r.id == id).map(|r| {
            Notice::success("Integration uploaded and saved successfully!").with_link(&r.s3_url)
        })
    });

    let mut view = PageView::new(records);
    if let Some(notice) = notice {
        view = view.with_notice(notice);
    }

    Ok(Html(state.templates.render_page(&view)?))
}

/// Handle the upload form. Success redirects back to the page; failures
/// re-render it with the message and the submitted text.
#[instrument(skip(state, multipart))]
pub async fn upload_integration(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut request = UploadRequest::default();
    let max_size = state.service.max_upload_size();
    let parsed = read_upload_form(&mut multipart, &mut request, max_size).await;

    let form = UploadFormValues {
        name: request.name.clone(),
        description: request.description.clone(),
    };

    let result = match parsed {
        Ok(()) => state.service.upload(request).await,
        Err(e) => Err(e),
    };

    let (status, notice) = match result {
        Ok(record) => {
            let location = format!("{PAGE_PATH}?uploaded={}", record.id);
            return Ok(Redirect::to(&location).into_response());
        }
        Err(IntegrationError::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Notice::warning(msg))
        }
        Err(err) => {
            error!(error = %err, "Upload failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Notice::error(format!("Upload failed: {err}")),
            )
        }
    };

    let records = state.service.list().await?;
    let view = PageView::new(records).with_notice(notice).with_form(form);
    let html = state.templates.render_page(&view)?;
    Ok((status, Html(html)).into_response())
}

/// Add to or remove from the retrieval set, then show the page again.
#[instrument(skip(state))]
pub async fn set_rag_flag(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppForm(form): AppForm<RagForm>,
) -> Result<Redirect, AppError> {
    match state.service.set_ragged(id, form.enabled).await {
        Ok(_) => {}
        Err(IntegrationError::NotFound(_)) => warn!(id, "Toggle on a missing integration"),
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to(PAGE_PATH))
}

/// Delete the record and its blob, then show the page again.
#[instrument(skip(state))]
pub async fn delete_integration(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    match state.service.delete(id).await {
        Ok(_) => {}
        Err(IntegrationError::NotFound(_)) => warn!(id, "Delete on a missing integration"),
        Err(e) => return Err(e.into()),
    }
    Ok(Redirect::to(PAGE_PATH))
}

/// Collect `name`, `description` and `file` from the multipart body.
///
/// A file part with no filename (nothing chosen in the picker) counts as absent.
async fn read_upload_form(
    multipart: &mut Multipart,
    request: &mut UploadRequest,
    max_size: u64,
) -> Result<(), IntegrationError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| IntegrationError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("name") => request.name = read_text(field).await?,
            Some("description") => request.description = read_text(field).await?,
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = read_file(field, max_size).await?;
                if !filename.is_empty() {
                    request.file = Some(SpecFile { filename, bytes });
                }
            }
            _ => {} // Ignore unknown fields.
        }
    }
    Ok(())
}

async fn read_text(field: Field<'_>) -> Result<String, IntegrationError> {
    field
        .text()
        .await
        .map_err(|e| IntegrationError::Validation(format!("Failed to read form field: {e}")))
}

async fn read_file(mut field: Field<'_>, max_size: u64) -> Result<Vec<u8>, IntegrationError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| IntegrationError::Validation(format!("Upload read error: {e}")))?
    {
        if (bytes.len() + chunk.len()) as u64 > max_size {
            return Err(IntegrationError::Validation(format!(
                "File exceeds maximum size of {max_size} bytes"
            )));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}
