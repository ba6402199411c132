//! Caller identity and role checks
//!
//! The caller's identity is whatever integer it puts in the `X-User-ID`
//! header. Nothing verifies it; login merely tells a client which id to send.

pub mod password;

pub use password::{BcryptHasher, HashError, PasswordHasher};

use crate::models::{TodoScope, User};
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use sqlx::SqlitePool;
use std::convert::Infallible;
use tracing::warn;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Identifier of the calling user, `0` when the header is absent or not an
/// integer. No user ever has id 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i64);

impl CurrentUser {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or(0);
        CurrentUser(id)
    }

    pub fn id(&self) -> i64 {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser::from_headers(&parts.headers))
    }
}

/// Whether `user_id` belongs to an admin. Unknown users and lookup failures
/// count as "not admin".
pub async fn is_admin(pool: &SqlitePool, user_id: i64) -> bool {
    if user_id <= 0 {
        return false;
    }

    match User::role_of(pool, user_id).await {
        Ok(role) => role.is_some_and(|role| role.is_admin()),
        Err(err) => {
            warn!(user_id, error = %err, "role lookup failed, treating caller as non-admin");
            false
        }
    }
}

/// Todos visible to `user`
pub async fn todo_scope(pool: &SqlitePool, user: CurrentUser) -> TodoScope {
    if is_admin(pool, user.id()).await {
        TodoScope::All
    } else {
        TodoScope::AssignedTo(user.id())
    }
}
