//! Todo list HTTP service with users, admin/user roles and comments.
//!
//! Admins see and manage every todo; regular users only see the todos
//! assigned to them. Callers identify themselves with the `X-User-ID`
//! header.

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod models;
pub mod requests;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{AppConfig, AppConfigTrait};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
