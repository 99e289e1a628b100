use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::model::{NewUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,

    #[error("user not found: {0}")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for user records.
///
/// `create` must reject a second record with the same email even when two
/// callers race past a `find_by_email` check. `save` never rewrites the
/// password hash and never clears the deleted flag.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str, include_deleted: bool)
        -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Assigns id and creation timestamps.
    async fn create(&self, new_user: NewUser) -> StoreResult<User>;

    /// Persists mutable fields and bumps `updated_at`.
    async fn save(&self, user: &User) -> StoreResult<User>;
}
