//! Server configuration
//!
//! All runtime knobs are read once at startup into an immutable `Config`
//! that gets passed into the application state; nothing reads the
//! environment after boot.

use anyhow::Context;

/// Default token lifetime: 7 days, the lifetime the service has always
/// issued.
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 168;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub bind_address: String,
    pub allowed_origins: Vec<String>,
    /// When true, the movie/genre/director read endpoints are served
    /// without a bearer token. Default is gated.
    pub public_catalog: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        anyhow::ensure!(
            jwt_secret.len() >= 32,
            "JWT_SECRET must be at least 32 bytes"
        );

        let jwt_expiry_hours = match std::env::var("JWT_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse::<i64>()
                .context("JWT_EXPIRY_HOURS must be an integer number of hours")?,
            Err(_) => DEFAULT_JWT_EXPIRY_HOURS,
        };
        anyhow::ensure!(jwt_expiry_hours > 0, "JWT_EXPIRY_HOURS must be positive");

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let allowed_origins = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let public_catalog = std::env::var("PUBLIC_CATALOG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiry_hours,
            bind_address,
            allowed_origins,
            public_catalog,
        })
    }
}
