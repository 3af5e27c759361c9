use crate::adapters::database::records::UserRecord;
use crate::domain::user::{User, UserFields};
use crate::error::Result;
use sqlx::PgConnection;

#[derive(Clone, Debug, Default)]
pub struct UserRepository {}

impl UserRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Fetches every user, newest first.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn list_all(&self, conn: &mut PgConnection) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRecord>(
            r"
            SELECT id, first_name, last_name, email, phone, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(conn)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Finds a user by its ID.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the query fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn find_by_id(&self, conn: &mut PgConnection, id: i64) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, first_name, last_name, email, phone, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Inserts a new user and returns the ID assigned by the database.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the insert fails.
    #[tracing::instrument(level = "debug", skip(self, conn, fields))]
    pub(crate) async fn create(&self, conn: &mut PgConnection, fields: &UserFields) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO users (first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(fields.phone.as_deref())
        .fetch_one(conn)
        .await?;

        Ok(id)
    }

    /// Overwrites the mutable fields of a user. Returns the number of rows affected.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the update fails.
    #[tracing::instrument(level = "debug", skip(self, conn, fields))]
    pub(crate) async fn update(&self, conn: &mut PgConnection, id: i64, fields: &UserFields) -> Result<u64> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET first_name = $2, last_name = $3, email = $4, phone = $5
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.email)
        .bind(fields.phone.as_deref())
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Deletes a user. Returns the number of rows affected.
    ///
    /// # Errors
    /// Returns `sqlx::Error` if the deletion fails.
    #[tracing::instrument(level = "debug", skip(self, conn))]
    pub(crate) async fn delete(&self, conn: &mut PgConnection, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(conn).await?;
        Ok(result.rows_affected())
    }
}
