//! Request bodies and their validation

pub mod auth;
pub mod comment;
pub mod todo;

pub use auth::{LoginRequest, SignupRequest};
pub use comment::CreateCommentRequest;
pub use todo::{CreateTodoRequest, UpdateTodoRequest};

use crate::error::ApiError;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::{async_trait, Json};
use serde::de::DeserializeOwned;

/// Input checks that go beyond what deserialization enforces
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// JSON body that has been decoded and validated. Malformed bodies are
/// rejected with 400.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// Integer id taken from the route. Non-numeric segments are rejected with
/// 400 and the same plain-text body as other input errors.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(PathId(id))
    }
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} must not be empty")));
    }
    Ok(())
}
