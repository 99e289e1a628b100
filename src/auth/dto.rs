use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::{
    model::{Gender, SecurityLevel, TravelPreferences},
    Profile, User,
};

/// Request body for user registration. Required fields default to empty so
/// that a missing field is reported by validation, not by the JSON decoder.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub profile: Profile,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("profile", &self.profile)
            .finish()
    }
}

/// Request body for login.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct WithdrawResponse {
    pub message: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub gender: Option<Gender>,
    pub country: Option<String>,
    pub age: Option<i32>,
    pub preferred_language: Option<Vec<String>>,
    pub travel_preferences: Option<TravelPreferences>,
    pub security_level: SecurityLevel,
    pub is_email_verified: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub account_creation_date: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            gender: u.gender,
            country: u.country,
            age: u.age,
            preferred_language: u.preferred_language,
            travel_preferences: u.travel_preferences.map(|j| j.0),
            security_level: u.security_level,
            is_email_verified: u.is_email_verified,
            last_login_date: u.last_login_date,
            account_creation_date: u.account_creation_date,
        }
    }
}
