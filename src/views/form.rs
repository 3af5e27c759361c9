use super::render_page;
use crate::domain::user::UserFields;
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

impl FormMode {
    const fn action(self) -> &'static str {
        match self {
            Self::Create => "/users/create",
            Self::Edit { .. } => "/users/edit",
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Create => "Add User",
            Self::Edit { .. } => "Edit User",
        }
    }

    const fn submit_label(self) -> &'static str {
        match self {
            Self::Create => "Add User",
            Self::Edit { .. } => "Update User",
        }
    }

    const fn id(self) -> Option<i64> {
        match self {
            Self::Create => None,
            Self::Edit { id } => Some(id),
        }
    }
}

#[derive(Serialize)]
struct UserFormView<'a> {
    title: &'static str,
    action: &'static str,
    submit_label: &'static str,
    id: Option<i64>,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
}

/// Renders the create or edit form, pre-filled with `fields`.
///
/// # Errors
/// Returns `AppError::Internal` if the template cannot be rendered.
pub fn user_form(mode: FormMode, fields: &UserFields) -> Result<String> {
    let view = UserFormView {
        title: mode.title(),
        action: mode.action(),
        submit_label: mode.submit_label(),
        id: mode.id(),
        first_name: &fields.first_name,
        last_name: &fields.last_name,
        email: &fields.email,
        phone: fields.phone.as_deref().unwrap_or_default(),
    };

    render_page(mode.title(), "user_form", &view)
}
