use crate::database;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::error;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthStatus>> {
    database::ping(&state.pool)
        .await
        .map_err(|err| {
            error!(error = %err, "health check could not reach the database");
            ApiError::unavailable("database unreachable")
        })?;

    Ok(Json(HealthStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        database: "ok",
    }))
}
