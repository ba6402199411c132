use crate::auth::{BcryptHasher, PasswordHasher};
use crate::config::AuthConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared handler state. Cloned per request; the pool and hasher are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    pub fn new(pool: SqlitePool, auth: &AuthConfig) -> Self {
        Self {
            pool,
            hasher: Arc::new(BcryptHasher::new(auth.bcrypt_cost)),
        }
    }
}
