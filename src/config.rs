use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: std::env::var("DATABASE_URL")?,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            acquire_timeout_secs: env_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 5),
        };
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "tripmate".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "tripmate-users".into()),
            // tokens live for a day unless overridden
            ttl_minutes: env_or("JWT_TTL_MINUTES", 60 * 24),
        };
        let api_prefix = normalize_prefix(
            &std::env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".into()),
        );
        Ok(Self {
            database,
            jwt,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 8080),
            api_prefix,
        })
    }
}

/// Ensures a leading slash and strips trailing ones; an empty prefix stays empty.
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(normalize_prefix("api/v1/"), "/api/v1");
        assert_eq!(normalize_prefix("/api"), "/api");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }

    #[test]
    fn env_or_falls_back_on_unparsable_values() {
        std::env::set_var("TRIPMATE_TEST_PORT", "not-a-number");
        assert_eq!(env_or::<u16>("TRIPMATE_TEST_PORT", 8080), 8080);
        std::env::set_var("TRIPMATE_TEST_PORT", "9090");
        assert_eq!(env_or::<u16>("TRIPMATE_TEST_PORT", 8080), 9090);
        std::env::remove_var("TRIPMATE_TEST_PORT");
    }
}
