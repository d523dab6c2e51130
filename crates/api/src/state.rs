//! Application state

use sqlx::PgPool;

use crate::{
    auth::{generate_impossible_hash, AuthState, JwtManager},
    config::Config,
};

/// Shared application state. Immutable after startup; the signing secret
/// lives inside the JWT manager and is never read again from the
/// environment.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub jwt_manager: JwtManager,
    /// Digest no password matches. Login verifies against this when the
    /// username is unknown so both failure paths cost the same.
    dummy_hash: String,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> anyhow::Result<Self> {
        let jwt_manager = JwtManager::new(&config.jwt_secret, config.jwt_expiry_hours);
        let dummy_hash = generate_impossible_hash()?;

        Ok(Self {
            pool,
            config,
            jwt_manager,
            dummy_hash,
        })
    }

    /// Get auth state for the request gate.
    pub fn auth_state(&self) -> AuthState {
        AuthState {
            jwt_manager: self.jwt_manager.clone(),
            public_catalog: self.config.public_catalog,
        }
    }

    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }
}
