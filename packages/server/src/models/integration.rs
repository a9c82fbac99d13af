use serde::{Deserialize, Serialize};

use crate::entity::integration;

/// One row of the listing.
#[derive(Debug, Serialize)]
pub struct IntegrationView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub file_url: String,
    pub filename: String,
    pub is_vectorized: bool,
    pub is_ragged: bool,
    /// Form value the toggle button submits: the negation of `is_ragged`,
    /// spelled the way the `enabled` form field parses.
    pub toggle_to: &'static str,
    pub toggle_label: &'static str,
}

impl From<integration::Model> for IntegrationView {
    fn from(model: integration::Model) -> Self {
        let (toggle_to, toggle_label) = if model.is_ragged {
            ("false", "Remove from RAG")
        } else {
            ("true", "Add to RAG")
        };
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            file_url: model.s3_url,
            filename: model.filename,
            is_vectorized: model.is_vectorized,
            is_ragged: model.is_ragged,
            toggle_to,
            toggle_label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Inline message shown above the form.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub link: Option<String>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            link: None,
        }
    }
}

/// Text inputs echoed back into the form after a rejected upload.
#[derive(Debug, Default, Serialize)]
pub struct UploadFormValues {
    pub name: String,
    pub description: String,
}

/// Everything the page template needs.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub integrations: Vec<IntegrationView>,
    pub notice: Option<Notice>,
    pub form: UploadFormValues,
    pub accept: String,
}

impl PageView {
    pub fn new(records: Vec<integration::Model>) -> Self {
        Self {
            integrations: records.into_iter().map(IntegrationView::from).collect(),
            notice: None,
            form: UploadFormValues::default(),
            accept: crate::utils::filename::SPEC_EXTENSIONS
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_form(mut self, form: UploadFormValues) -> Self {
        self.form = form;
        self
    }
}

/// Query string of `GET /integrations`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Id of a record just created; shows the success notice.
    pub uploaded: Option<i32>,
}

/// Body of the toggle button.
#[derive(Debug, Deserialize)]
pub struct RagForm {
    pub enabled: bool,
}
