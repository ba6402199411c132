use super::{require_non_blank, Validate};
use crate::error::ApiError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

impl Validate for CreateCommentRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank("content", &self.content)
    }
}
