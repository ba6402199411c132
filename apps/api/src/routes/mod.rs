mod auth;
mod comment;
mod health;
mod todo;
mod user;

use crate::auth::USER_ID_HEADER;
use crate::config::HttpConfig;
use crate::state::AppState;
use axum::http::{header, HeaderName, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Build the application router with its middleware stack
pub fn router(state: AppState, http: &HttpConfig) -> Router {
    let app = Router::new()
        .route("/health", get(health::health))
        .merge(auth::router())
        .merge(user::router())
        .nest("/todos", todo::router().merge(comment::router()))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(http.max_request_size))
        .layer(TimeoutLayer::new(http.request_timeout))
        .layer(TraceLayer::new_for_http());

    if http.cors_permissive {
        app.layer(cors_layer())
    } else {
        app
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
}
