use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::users::User;

/// Identity facts embedded in every access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub sub: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&User> for TokenSubject {
    fn from(user: &User) -> Self {
        Self {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // user ID
    pub email: String, // login email
    pub name: String,  // display name
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
    pub iss: String,   // issuer
    pub aud: String,   // audience
}
