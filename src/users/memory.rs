//! In-memory user store for tests.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use sqlx::types::Json;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{NewUser, User};
use super::store::{StoreError, StoreResult, UserStore};

#[derive(Debug, Default, Clone)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(
        &self,
        email: &str,
        include_deleted: bool,
    ) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email == email && (include_deleted || !u.is_deleted))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        // uniqueness is checked under the write lock, like a unique index
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = OffsetDateTime::now_utc();
        let profile = new_user.profile;
        let user = User {
            id: new_user.id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            gender: profile.gender,
            country: profile.country,
            age: profile.age,
            preferred_language: profile.preferred_language,
            travel_preferences: profile.travel_preferences.map(Json),
            security_level: Default::default(),
            is_email_verified: false,
            is_deleted: false,
            deleted_at: None,
            last_login_date: None,
            account_creation_date: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&user.id)
            .ok_or(StoreError::NotFound(user.id))?;

        stored.name = user.name.clone();
        stored.gender = user.gender;
        stored.country = user.country.clone();
        stored.age = user.age;
        stored.preferred_language = user.preferred_language.clone();
        stored.travel_preferences = user.travel_preferences.clone();
        stored.security_level = user.security_level;
        stored.is_email_verified = user.is_email_verified;
        stored.is_deleted = stored.is_deleted || user.is_deleted;
        stored.deleted_at = stored.deleted_at.or(user.deleted_at);
        stored.last_login_date = user.last_login_date;
        stored.updated_at = OffsetDateTime::now_utc();

        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::model::Profile;

    fn new_user(email: &str) -> NewUser {
        NewUser::new(
            email.into(),
            "hash".into(),
            "Tester".into(),
            Profile::default(),
        )
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = MemoryUserStore::new();
        store.create(new_user("a@example.com")).await.unwrap();
        let err = store.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn find_by_email_respects_deleted_filter() {
        let store = MemoryUserStore::new();
        let mut user = store.create(new_user("gone@example.com")).await.unwrap();
        user.mark_deleted(OffsetDateTime::now_utc());
        store.save(&user).await.unwrap();

        assert!(store
            .find_by_email("gone@example.com", false)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_email("gone@example.com", true)
            .await
            .unwrap()
            .is_some());
        assert!(store.find_by_id(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn save_never_touches_password_or_revives() {
        let store = MemoryUserStore::new();
        let mut user = store.create(new_user("b@example.com")).await.unwrap();
        user.mark_deleted(OffsetDateTime::now_utc());
        store.save(&user).await.unwrap();

        user.password_hash = "tampered".into();
        user.is_deleted = false;
        user.deleted_at = None;
        let saved = store.save(&user).await.unwrap();

        assert_eq!(saved.password_hash, "hash");
        assert!(saved.is_deleted);
        assert!(saved.deleted_at.is_some());
    }

    #[tokio::test]
    async fn save_unknown_user_is_not_found() {
        let store = MemoryUserStore::new();
        let mut user = store.create(new_user("c@example.com")).await.unwrap();
        user.id = Uuid::new_v4();
        let err = store.save(&user).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == user.id));
    }
}
