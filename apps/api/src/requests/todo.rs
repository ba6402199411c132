use super::{require_non_blank, Validate};
use crate::error::ApiError;
use crate::models::TodoChanges;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub assigned_to: Option<i64>,
}

impl CreateTodoRequest {
    /// Zero (or any non-positive id) means "unassigned"
    pub fn assignee(&self) -> Option<i64> {
        self.assigned_to.filter(|id| *id > 0)
    }
}

impl Validate for CreateTodoRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_non_blank("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl Validate for UpdateTodoRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.title.is_none() && self.completed.is_none() {
            return Err(ApiError::bad_request("Nothing to update"));
        }
        if let Some(title) = &self.title {
            require_non_blank("title", title)?;
        }
        Ok(())
    }
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(request: UpdateTodoRequest) -> Self {
        TodoChanges {
            title: request.title.map(|title| title.trim().to_string()),
            completed: request.completed,
        }
    }
}
