use crate::auth::{self, CurrentUser};
use crate::error::{ApiError, ApiResult};
use crate::models::{Comment, Todo, User};
use crate::requests::{CreateCommentRequest, PathId, ValidJson};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, warn};

pub fn router() -> Router<AppState> {
    Router::new().route("/:id/comments", get(list_comments).post(add_comment))
}

/// Comments follow the visibility of their todo
async fn ensure_visible(state: &AppState, user: CurrentUser, todo_id: i64) -> ApiResult<()> {
    let scope = auth::todo_scope(&state.pool, user).await;
    Todo::find(&state.pool, todo_id, scope)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApiError::not_found("Todo"))
}

async fn list_comments(
    State(state): State<AppState>,
    user: CurrentUser,
    PathId(todo_id): PathId,
) -> ApiResult<Json<Vec<Comment>>> {
    ensure_visible(&state, user, todo_id).await?;
    Ok(Json(Comment::for_todo(&state.pool, todo_id).await?))
}

async fn add_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    PathId(todo_id): PathId,
    ValidJson(input): ValidJson<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    ensure_visible(&state, user, todo_id).await?;

    // A todo may be assigned to an id with no account behind it; that id
    // can read the todo but cannot author comments.
    if User::role_of(&state.pool, user.id()).await?.is_none() {
        warn!(user_id = user.id(), todo_id, "comment from unknown user rejected");
        return Err(ApiError::forbidden("Unknown user"));
    }

    let id = Comment::create(&state.pool, todo_id, user.id(), input.content.trim()).await?;
    let comment = Comment::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::internal("Created comment vanished"))?;

    info!(comment_id = id, todo_id, user_id = user.id(), "comment added");
    Ok((StatusCode::CREATED, Json(comment)))
}
