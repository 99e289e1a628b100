use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tracing::warn;
use uuid::Uuid;

use super::model::{NewUser, User};
use super::store::{StoreError, StoreResult, UserStore};

/// Postgres-backed user store. Uniqueness of `email` is enforced by the
/// `users_email_key` index, so a lost registration race surfaces as
/// `StoreError::DuplicateEmail`.
#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(
        &self,
        email: &str,
        include_deleted: bool,
    ) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, gender, country, age,
                   preferred_language, travel_preferences, security_level,
                   is_email_verified, is_deleted, deleted_at, last_login_date,
                   account_creation_date, updated_at
            FROM users
            WHERE email = $1 AND ($2 OR is_deleted = FALSE)
            "#,
        )
        .bind(email)
        .bind(include_deleted)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, gender, country, age,
                   preferred_language, travel_preferences, security_level,
                   is_email_verified, is_deleted, deleted_at, last_login_date,
                   account_creation_date, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let NewUser {
            id,
            email,
            password_hash,
            name,
            profile,
        } = new_user;

        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, name, gender, country, age,
                               preferred_language, travel_preferences)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, email, password_hash, name, gender, country, age,
                      preferred_language, travel_preferences, security_level,
                      is_email_verified, is_deleted, deleted_at, last_login_date,
                      account_creation_date, updated_at
            "#,
        )
        .bind(id)
        .bind(&email)
        .bind(password_hash)
        .bind(name)
        .bind(profile.gender)
        .bind(profile.country)
        .bind(profile.age)
        .bind(profile.preferred_language)
        .bind(profile.travel_preferences.map(Json))
        .fetch_one(&self.db)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                warn!(email = %email, "unique violation on users.email");
                Err(StoreError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        // password_hash is never written here; is_deleted only moves to true
        let saved = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2,
                gender = $3,
                country = $4,
                age = $5,
                preferred_language = $6,
                travel_preferences = $7,
                security_level = $8,
                is_email_verified = $9,
                is_deleted = is_deleted OR $10,
                deleted_at = COALESCE(deleted_at, $11),
                last_login_date = $12,
                updated_at = now()
            WHERE id = $1
            RETURNING id, email, password_hash, name, gender, country, age,
                      preferred_language, travel_preferences, security_level,
                      is_email_verified, is_deleted, deleted_at, last_login_date,
                      account_creation_date, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(user.gender)
        .bind(&user.country)
        .bind(user.age)
        .bind(&user.preferred_language)
        .bind(&user.travel_preferences)
        .bind(user.security_level)
        .bind(user.is_email_verified)
        .bind(user.is_deleted)
        .bind(user.deleted_at)
        .bind(user.last_login_date)
        .fetch_optional(&self.db)
        .await?;

        saved.ok_or(StoreError::NotFound(user.id))
    }
}
