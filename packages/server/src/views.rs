use axum::http::StatusCode;
use minijinja::{Environment, HtmlEscape};

use crate::models::integration::PageView;

const PAGE_TEMPLATE: &str = "integrations.html";

/// Compiled page templates. Built once at startup.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(
            PAGE_TEMPLATE,
            include_str!("../templates/integrations.html"),
        )?;
        Ok(Self { env })
    }

    /// Render the integrations page. Auto-escapes all values.
    pub fn render_page(&self, view: &PageView) -> Result<String, minijinja::Error> {
        self.env.get_template(PAGE_TEMPLATE)?.render(view)
    }
}

/// Minimal standalone page used for errors outside the main page.
pub fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>{code}</title></head>\
         <body><h1>{code}</h1><p>{message}</p><p><a href=\"/integrations\">Back to Integrations</a></p></body></html>\n",
        code = status,
        message = HtmlEscape(message),
    )
}
