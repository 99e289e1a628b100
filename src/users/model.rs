use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "security_level", rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportationType {
    Public,
    Private,
    Rental,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Hotel,
    Guesthouse,
    Hostel,
    Apartment,
}

/// Stored as jsonb.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TravelPreferences {
    #[serde(default)]
    pub preferred_destinations: Vec<String>,
    pub transportation_preference: TransportationType,
    #[serde(default)]
    pub accommodation_type: Vec<AccommodationType>,
}

/// Optional attributes accepted at registration and stored verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub gender: Option<Gender>,
    pub country: Option<String>,
    pub age: Option<i32>,
    pub preferred_language: Option<Vec<String>>,
    pub travel_preferences: Option<TravelPreferences>,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC string, never exposed
    pub name: String,
    pub gender: Option<Gender>,
    pub country: Option<String>,
    pub age: Option<i32>,
    pub preferred_language: Option<Vec<String>>,
    pub travel_preferences: Option<Json<TravelPreferences>>,
    pub security_level: SecurityLevel,
    pub is_email_verified: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<OffsetDateTime>,
    pub last_login_date: Option<OffsetDateTime>,
    pub account_creation_date: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl User {
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Marks the record deleted. Returns false if it already was.
    pub fn mark_deleted(&mut self, at: OffsetDateTime) -> bool {
        if self.is_deleted {
            return false;
        }
        self.is_deleted = true;
        self.deleted_at = Some(at);
        true
    }
}

/// Fields needed to insert a user. The id is minted here so claims can be
/// signed before the row exists; the store fills in the timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub profile: Profile,
}

impl NewUser {
    pub fn new(email: String, password_hash: String, name: String, profile: Profile) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = OffsetDateTime::now_utc();
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            name: "홍길동".into(),
            gender: Some(Gender::Male),
            country: Some("KR".into()),
            age: None,
            preferred_language: None,
            travel_preferences: None,
            security_level: SecurityLevel::default(),
            is_email_verified: false,
            is_deleted: false,
            deleted_at: None,
            last_login_date: None,
            account_creation_date: now,
            updated_at: now,
        }
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"gender\":\"male\""));
    }

    #[test]
    fn mark_deleted_keeps_first_timestamp() {
        let mut user = sample_user();
        let first = OffsetDateTime::now_utc();
        assert!(user.mark_deleted(first));
        assert!(!user.mark_deleted(first + time::Duration::hours(1)));
        assert!(!user.is_active());
        assert_eq!(user.deleted_at, Some(first));
    }

    #[test]
    fn travel_preferences_parse_lowercase_enums() {
        let prefs: TravelPreferences = serde_json::from_str(
            r#"{"preferred_destinations":["Jeju"],"transportation_preference":"rental","accommodation_type":["hostel","hotel"]}"#,
        )
        .unwrap();
        assert_eq!(prefs.transportation_preference, TransportationType::Rental);
        assert_eq!(
            prefs.accommodation_type,
            vec![AccommodationType::Hostel, AccommodationType::Hotel]
        );
    }
}
