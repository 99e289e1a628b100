use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use tracing::error;

lazy_static! {
    static ref DUMMY_HASH: String = hash_password("unmatched-login-placeholder").unwrap_or_default();
}

/// A real argon2 hash that no account owns. Login verifies against it when the
/// email has no active account, so both outcomes pay for one argon2 run.
pub fn dummy_hash() -> &'static str {
    DUMMY_HASH.as_str()
}

/// Hashes with a fresh random salt; the PHC string carries salt and params.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Test123!@#";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("Test123!@#").expect("hashing should succeed");
        assert!(!verify_password("WrongPass1!", &hash).expect("verify should not error"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("Test123!@#").unwrap();
        let b = hash_password("Test123!@#").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("Test123!@#", &a).unwrap());
        assert!(verify_password("Test123!@#", &b).unwrap());
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let hash = hash_password("Test123!@#").unwrap();
        assert!(!hash.contains("Test123!@#"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_password("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn dummy_hash_is_a_real_hash_that_matches_nothing() {
        assert!(dummy_hash().starts_with("$argon2"));
        assert!(!verify_password("Test123!@#", dummy_hash()).unwrap());
    }
}
