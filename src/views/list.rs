use super::{format_timestamp, render_page};
use crate::domain::user::User;
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct UserRow<'a> {
    id: i64,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    created_at: String,
}

#[derive(Serialize)]
struct UserListView<'a> {
    users: Vec<UserRow<'a>>,
}

/// Renders the table of all users, in the order given.
///
/// # Errors
/// Returns `AppError::Internal` if the template cannot be rendered.
pub fn user_list(users: &[User]) -> Result<String> {
    let rows = users
        .iter()
        .map(|user| UserRow {
            id: user.id,
            first_name: &user.first_name,
            last_name: &user.last_name,
            email: &user.email,
            phone: user.phone.as_deref().unwrap_or_default(),
            created_at: format_timestamp(user.created_at),
        })
        .collect();

    render_page("View Users", "user_list", &UserListView { users: rows })
}
