//! Server-rendered HTML pages.
//!
//! Templates live in `templates/` and are compiled into the binary. Handlebars
//! HTML-escapes every `{{value}}`; the only triple-stash is the layout's `{{{body}}}`,
//! which receives output that was already rendered and escaped.

mod form;
mod list;

pub use form::{FormMode, user_form};
pub use list::user_list;

use crate::error::{AppError, Result};
use axum::http::StatusCode;
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::LazyLock;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const TEMPLATES: [(&str, &str); 4] = [
    ("layout", include_str!("../../templates/layout.hbs")),
    ("user_list", include_str!("../../templates/user_list.hbs")),
    ("user_form", include_str!("../../templates/user_form.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
];

static REGISTRY: LazyLock<std::result::Result<Handlebars<'static>, String>> = LazyLock::new(|| {
    let mut registry = Handlebars::new();
    for (name, source) in TEMPLATES {
        registry.register_template_string(name, source).map_err(|e| format!("template {name}: {e}"))?;
    }
    Ok(registry)
});

fn registry() -> Result<&'static Handlebars<'static>> {
    REGISTRY.as_ref().map_err(|e| {
        tracing::error!(error = %e, "Template registration failed");
        AppError::Internal
    })
}

/// Compiles all templates up front so a broken template fails at startup.
///
/// # Errors
/// Returns `AppError::Internal` if any template does not parse.
pub fn ensure_templates() -> Result<()> {
    registry().map(|_| ())
}

#[derive(Serialize)]
struct Page<'a> {
    title: &'a str,
    body: &'a str,
}

/// Renders `template` with `data` and wraps the result in the shared layout.
fn render_page<T: Serialize>(title: &str, template: &str, data: &T) -> Result<String> {
    let registry = registry()?;
    let body = registry.render(template, data).map_err(|e| {
        tracing::error!(error = %e, template, "Template rendering failed");
        AppError::Internal
    })?;

    registry.render("layout", &Page { title, body: &body }).map_err(|e| {
        tracing::error!(error = %e, template = "layout", "Template rendering failed");
        AppError::Internal
    })
}

pub(crate) fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT).unwrap_or_else(|_| ts.unix_timestamp().to_string())
}

#[derive(Serialize)]
struct ErrorView<'a> {
    heading: &'a str,
    message: &'a str,
}

/// Renders a standalone error page.
///
/// # Errors
/// Returns `AppError::Internal` if the template cannot be rendered.
pub fn error_page(status: StatusCode, message: &str) -> Result<String> {
    let heading = format!("{} {}", status.as_u16(), status.canonical_reason().unwrap_or("Error"));
    render_page(&heading, "error", &ErrorView { heading: &heading, message })
}
