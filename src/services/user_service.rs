use crate::adapters::database::DbPool;
use crate::adapters::database::user_repo::UserRepository;
use crate::domain::user::{User, UserFields};
use crate::error::{AppError, Result};
use opentelemetry::{KeyValue, global, metrics::Counter};

#[derive(Clone, Debug)]
pub struct Metrics {
    pub mutations: Counter<u64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("user-admin");
        Self {
            mutations: meter
                .u64_counter("user_admin_user_mutations")
                .with_description("Number of successful create, update and delete operations")
                .build(),
        }
    }

    fn record(&self, operation: &'static str) {
        self.mutations.add(1, &[KeyValue::new("operation", operation)]);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Data access for user records.
///
/// Every call checks out its own pooled connection and hands it back when the call
/// returns, whether it succeeded or not.
#[derive(Clone, Debug)]
pub struct UserService {
    pool: DbPool,
    repo: UserRepository,
    metrics: Metrics,
}

impl UserService {
    #[must_use]
    pub fn new(pool: DbPool, repo: UserRepository) -> Self {
        Self { pool, repo, metrics: Metrics::new() }
    }

    /// Lists all users ordered by creation time, newest first.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unreachable or the query fails.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let mut conn = self.pool.acquire().await?;
        self.repo.list_all(&mut conn).await
    }

    /// Fetches a single user.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no user has this ID.
    pub async fn get_by_id(&self, id: i64) -> Result<User> {
        let mut conn = self.pool.acquire().await?;
        self.repo.find_by_id(&mut conn, id).await?.ok_or(AppError::NotFound)
    }

    /// Creates a user from the given fields without further validation.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the insert is rejected.
    pub async fn create(&self, fields: &UserFields) -> Result<i64> {
        let mut conn = self.pool.acquire().await?;
        let id = self.repo.create(&mut conn, fields).await?;

        self.metrics.record("create");
        tracing::info!(user_id = id, "User created");
        Ok(id)
    }

    /// Overwrites the mutable fields of an existing user.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if no row matched `id`.
    pub async fn update(&self, id: i64, fields: &UserFields) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        let affected = self.repo.update(&mut conn, id, fields).await?;
        if affected == 0 {
            return Err(AppError::NotFound);
        }

        self.metrics.record("update");
        tracing::info!(user_id = id, "User updated");
        Ok(())
    }

    /// Deletes a user. Deleting an unknown ID succeeds.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the statement fails.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        let affected = self.repo.delete(&mut conn, id).await?;

        if affected == 0 {
            tracing::debug!(user_id = id, "Delete matched no rows");
        } else {
            self.metrics.record("delete");
            tracing::info!(user_id = id, "User deleted");
        }
        Ok(())
    }
}
