//! Password hashing

use bcrypt::{hash, verify};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
#[error("Password hashing failed: {message}")]
pub struct HashError {
    message: String,
}

impl From<bcrypt::BcryptError> for HashError {
    fn from(err: bcrypt::BcryptError) -> Self {
        HashError {
            message: err.to_string(),
        }
    }
}

/// Salted one-way password hashing
pub trait PasswordHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// A stored hash that cannot be parsed verifies as a mismatch
    fn verify_password(&self, password: &str, hash: &str) -> bool;

    /// A valid hash that no caller knows the password for. Verifying against
    /// it costs as much as verifying a real account.
    fn decoy_hash(&self) -> &str;

    fn hasher_name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
    decoy: OnceLock<String>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-missing-accounts";

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self {
            cost,
            decoy: OnceLock::new(),
        }
    }

    /// Minimum cost, for tests
    pub fn development() -> Self {
        Self::new(4)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(hash(password, self.cost)?)
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        match verify(password, hash) {
            Ok(matches) => matches,
            Err(err) => {
                debug!(error = %err, "stored password hash is unusable");
                false
            }
        }
    }

    fn decoy_hash(&self) -> &str {
        self.decoy.get_or_init(|| {
            hash(DECOY_PASSWORD, self.cost).unwrap_or_else(|err| {
                debug!(error = %err, "failed to build decoy hash");
                String::new()
            })
        })
    }

    fn hasher_name(&self) -> &str {
        "bcrypt"
    }
}
