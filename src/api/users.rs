use crate::api::AppState;
use crate::api::extract::{PageForm, PageQuery};
use crate::domain::user::UserFields;
use crate::error::{AppError, Result};
use crate::views::{self, FormMode};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

const LIST_PATH: &str = "/users";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub delete: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EditParams {
    pub id: i64,
}

/// Posted user fields. Absent fields arrive as empty strings; surrounding whitespace is dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Posted edit form. Only `id` is mandatory.
#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl From<UpdateUserForm> for UserForm {
    fn from(form: UpdateUserForm) -> Self {
        Self { first_name: form.first_name, last_name: form.last_name, email: form.email, phone: form.phone }
    }
}

impl UserForm {
    fn into_fields(self) -> UserFields {
        let phone = self.phone.trim();
        UserFields {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: if phone.is_empty() { None } else { Some(phone.to_string()) },
        }
    }
}

fn validated(form: UserForm) -> Result<UserFields> {
    let fields = form.into_fields();
    if let Some(label) = fields.missing_required() {
        return Err(AppError::Validation(format!("{label} is required")));
    }
    Ok(fields)
}

pub async fn index() -> Redirect {
    Redirect::to(LIST_PATH)
}

/// Renders the user table, or deletes a user when `?delete=<id>` is present.
pub async fn list_users(State(state): State<AppState>, PageQuery(params): PageQuery<ListParams>) -> Result<Response> {
    if let Some(id) = params.delete {
        state.user_service.delete(id).await?;
        return Ok(Redirect::to(LIST_PATH).into_response());
    }

    let users = state.user_service.list_all().await?;
    Ok(Html(views::user_list(&users)?).into_response())
}

pub async fn new_user_form() -> Result<Html<String>> {
    Ok(Html(views::user_form(FormMode::Create, &UserFields::default())?))
}

pub async fn create_user(State(state): State<AppState>, PageForm(form): PageForm<UserForm>) -> Result<impl IntoResponse> {
    let fields = validated(form)?;
    state.user_service.create(&fields).await?;
    Ok(Redirect::to(LIST_PATH))
}

pub async fn edit_user_form(State(state): State<AppState>, PageQuery(params): PageQuery<EditParams>) -> Result<impl IntoResponse> {
    let user = state.user_service.get_by_id(params.id).await?;
    Ok(Html(views::user_form(FormMode::Edit { id: user.id }, &UserFields::from(&user))?))
}

pub async fn update_user(State(state): State<AppState>, PageForm(form): PageForm<UpdateUserForm>) -> Result<impl IntoResponse> {
    let id = form.id;
    let fields = validated(form.into())?;
    state.user_service.update(id, &fields).await?;
    Ok(Redirect::to(LIST_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_phone_becomes_none() {
        let form = UserForm { phone: "  ".into(), ..UserForm::default() };
        assert_eq!(form.into_fields().phone, None);
    }

    #[test]
    fn all_fields_are_trimmed() {
        let form = UserForm {
            first_name: "  Ada ".into(),
            last_name: "\tLovelace".into(),
            email: " ada@x.com\n".into(),
            phone: " 555 ".into(),
        };

        let fields = form.into_fields();
        assert_eq!(fields.first_name, "Ada");
        assert_eq!(fields.last_name, "Lovelace");
        assert_eq!(fields.email, "ada@x.com");
        assert_eq!(fields.phone.as_deref(), Some("555"));
    }

    #[test]
    fn validation_names_the_missing_field() {
        let form = UserForm { first_name: "Ada".into(), email: "ada@x.com".into(), ..UserForm::default() };

        match validated(form) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Last name is required"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn complete_form_passes_through() {
        let form = UserForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@x.com".into(),
            phone: "555-1000".into(),
        };

        let fields = validated(form).unwrap();
        assert_eq!(fields.phone.as_deref(), Some("555-1000"));
        assert_eq!(fields.email, "ada@x.com");
    }
}
