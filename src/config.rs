use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    pub secret: String,
    pub session_ttl_minutes: i64,
    pub remember_ttl_minutes: i64,
    pub reset_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    /// Base URL embedded in password-reset links.
    pub public_base_url: String,
    pub token: TokenConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
        let token = TokenConfig {
            secret: std::env::var("SECRET_KEY")?,
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            remember_ttl_minutes: std::env::var("REMEMBER_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 30),
            reset_ttl_seconds: std::env::var("RESET_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(1800),
        };
        Ok(Self {
            database_url,
            public_base_url,
            token,
        })
    }
}
