//! Registration, login, profile lookup and soft deletion.

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    claims::TokenSubject,
    dto::{LoginRequest, PublicUser, RegisterRequest},
    jwt::TokenIssuer,
    password::{dummy_hash, hash_password, verify_password},
    validation::normalize_email,
};
use crate::{
    error::{AuthError, AuthResult},
    users::{NewUser, UserStore},
};

type VerifyFn = fn(&str, &str) -> anyhow::Result<bool>;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    issuer: Arc<dyn TokenIssuer>,
    verify: VerifyFn,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            store,
            issuer,
            verify: verify_password,
        }
    }

    #[cfg(test)]
    fn with_verifier(mut self, verify: VerifyFn) -> Self {
        self.verify = verify;
        self
    }

    /// Creates an account and returns an access token for it.
    ///
    /// The token is signed before the row is written, so a signing failure
    /// leaves nothing behind and a failed insert discards the token.
    #[instrument(skip(self, req))]
    pub async fn register(&self, mut req: RegisterRequest) -> AuthResult<String> {
        req.normalize();
        if let Err(fields) = req.validate() {
            warn!(email = %req.email, errors = fields.len(), "registration rejected");
            return Err(AuthError::Validation(fields));
        }

        // deleted accounts still hold their email
        if self.store.find_by_email(&req.email, true).await?.is_some() {
            warn!(email = %req.email, "email already registered");
            return Err(AuthError::Conflict);
        }

        let password_hash = hash_password(&req.password)?;
        let new_user = NewUser::new(req.email, password_hash, req.name, req.profile);

        let token = self.issuer.sign(&TokenSubject {
            sub: new_user.id,
            email: new_user.email.clone(),
            name: new_user.name.clone(),
        })?;

        let user = self.store.create(new_user).await.map_err(|e| {
            warn!(error = %e, "create user failed");
            AuthError::from(e)
        })?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(token)
    }

    /// Verifies credentials against active accounts only.
    #[instrument(skip(self, req))]
    pub async fn login(&self, req: LoginRequest) -> AuthResult<String> {
        let email = normalize_email(&req.email);

        let Some(mut user) = self.store.find_by_email(&email, false).await? else {
            // same argon2 cost as a wrong password
            let _ = (self.verify)(&req.password, dummy_hash());
            warn!(email = %email, "login unknown or deleted email");
            return Err(AuthError::Unauthorized);
        };

        if !(self.verify)(&req.password, &user.password_hash)? {
            warn!(email = %email, user_id = %user.id, "login invalid password");
            return Err(AuthError::Unauthorized);
        }

        user.last_login_date = Some(OffsetDateTime::now_utc());
        let user = self.store.save(&user).await?;

        let token = self.issuer.sign(&TokenSubject::from(&user))?;
        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(token)
    }

    /// Soft-deletes the account. Repeating the call on a deleted account is
    /// a no-op that keeps the original `deleted_at`.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: Uuid) -> AuthResult<()> {
        let Some(mut user) = self.store.find_by_id(user_id).await? else {
            warn!(user_id = %user_id, "delete for unknown user");
            return Err(AuthError::Unauthorized);
        };

        if !user.mark_deleted(OffsetDateTime::now_utc()) {
            info!(user_id = %user_id, "account already deleted");
            return Ok(());
        }

        self.store.save(&user).await?;
        info!(user_id = %user_id, "account deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: Uuid) -> AuthResult<PublicUser> {
        match self.store.find_by_id(user_id).await? {
            Some(user) if user.is_active() => Ok(PublicUser::from(user)),
            _ => {
                warn!(user_id = %user_id, "profile for unknown or deleted user");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
