use crate::error::{ApiError, ApiResult};
use crate::models::{Role, User};
use crate::requests::{LoginRequest, SignupRequest, ValidJson};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: i64,
    pub role: Role,
    pub message: &'static str,
}

async fn signup(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let hasher = state.hasher.clone();
    let password = input.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash_password(&password)).await??;

    let account = User::create(&state.pool, &input.username, &password_hash)
        .await
        .map_err(|err| match ApiError::from(err) {
            ApiError::Conflict { .. } => ApiError::conflict("Username already taken"),
            other => other,
        })?;

    info!(user_id = account.id, role = %account.role, "user signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: account.id,
            role: account.role,
            message: "Signup successful",
        }),
    ))
}

/// Checks the password and hands back the user record. No token is issued:
/// the client sends the returned id in `X-User-ID` from then on.
async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> ApiResult<Json<User>> {
    let credentials = User::credentials_by_username(&state.pool, &input.username).await?;

    // Unknown usernames are checked against a decoy hash so both failures
    // cost the same bcrypt work.
    let hasher = state.hasher.clone();
    let stored_hash = credentials.as_ref().map(|user| user.password_hash.clone());
    let verified = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => hasher.verify_password(&input.password, &hash),
        None => {
            hasher.verify_password(&input.password, hasher.decoy_hash());
            false
        }
    })
    .await?;

    let credentials = match credentials {
        Some(credentials) if verified => credentials,
        _ => return Err(ApiError::unauthorized()),
    };

    info!(user_id = credentials.id, "user logged in");
    Ok(Json(credentials.into()))
}
