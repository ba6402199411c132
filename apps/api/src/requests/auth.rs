use super::{require_non_blank, Validate};
use crate::error::ApiError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank("username", &self.username)?;
        require_non_blank("password", &self.password)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Blank credentials simply fail verification with 401
impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}
