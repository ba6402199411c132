use crate::auth::{self, CurrentUser};
use crate::error::{ApiError, ApiResult};
use crate::models::{Todo, TodoScope};
use crate::requests::{CreateTodoRequest, PathId, UpdateTodoRequest, ValidJson};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, warn};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/:id", get(get_todo).put(update_todo).delete(delete_todo))
}

async fn list_todos(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Todo>>> {
    let scope = auth::todo_scope(&state.pool, user).await;
    Ok(Json(Todo::list(&state.pool, scope).await?))
}

async fn create_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidJson(input): ValidJson<CreateTodoRequest>,
) -> ApiResult<(StatusCode, Json<Todo>)> {
    if !auth::is_admin(&state.pool, user.id()).await {
        warn!(user_id = user.id(), "non-admin tried to create a todo");
        return Err(ApiError::forbidden("Only admins can create todos"));
    }

    let id = Todo::create(&state.pool, input.title.trim(), input.assignee()).await?;
    let todo = Todo::find(&state.pool, id, TodoScope::All)
        .await?
        .ok_or_else(|| ApiError::internal("Created todo vanished"))?;

    info!(todo_id = id, assigned_to = todo.assigned_to, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    PathId(id): PathId,
) -> ApiResult<Json<Todo>> {
    let scope = auth::todo_scope(&state.pool, user).await;
    Todo::find(&state.pool, id, scope)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Todo"))
}

async fn update_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    PathId(id): PathId,
    ValidJson(input): ValidJson<UpdateTodoRequest>,
) -> ApiResult<Json<Todo>> {
    let scope = auth::todo_scope(&state.pool, user).await;

    if !Todo::update(&state.pool, id, scope, input.into()).await? {
        return Err(ApiError::not_found("Todo"));
    }

    let todo = Todo::find(&state.pool, id, scope)
        .await?
        .ok_or_else(|| ApiError::not_found("Todo"))?;

    info!(todo_id = id, user_id = user.id(), completed = todo.completed, "todo updated");
    Ok(Json(todo))
}

/// Always 204: deleting an absent or invisible todo is a no-op
async fn delete_todo(
    State(state): State<AppState>,
    user: CurrentUser,
    PathId(id): PathId,
) -> ApiResult<StatusCode> {
    let scope = auth::todo_scope(&state.pool, user).await;
    let deleted = Todo::delete(&state.pool, id, scope).await?;

    if deleted > 0 {
        info!(todo_id = id, user_id = user.id(), "todo deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
