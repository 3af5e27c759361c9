use time::OffsetDateTime;

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: OffsetDateTime,
}

/// The mutable part of a user, as supplied on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl UserFields {
    /// Returns the first required field that is blank, if any.
    #[must_use]
    pub fn missing_required(&self) -> Option<&'static str> {
        [("First name", &self.first_name), ("Last name", &self.last_name), ("Email", &self.email)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
    }
}

impl From<&User> for UserFields {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
        }
    }
}
