#![allow(dead_code)]

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use todo_api::config::AppConfig;
use todo_api::server;
use tower::ServiceExt;

/// Full application backed by a private in-memory database
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let (router, pool) = server::build_app(&AppConfig::testing())
            .await
            .expect("failed to build test app");
        Self { router, pool }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = user_id {
            builder = builder.header("X-User-ID", id.to_string());
        }

        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, user_id: Option<i64>) -> TestResponse {
        self.request(Method::GET, uri, user_id, None).await
    }

    pub async fn post(&self, uri: &str, user_id: Option<i64>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, user_id, Some(body)).await
    }

    pub async fn put(&self, uri: &str, user_id: Option<i64>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, user_id, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user_id: Option<i64>) -> TestResponse {
        self.request(Method::DELETE, uri, user_id, None).await
    }

    /// Sign up and return the new user's id
    pub async fn signup(&self, username: &str, password: &str) -> i64 {
        let response = self
            .post(
                "/signup",
                None,
                serde_json::json!({"username": username, "password": password}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["id"].as_i64().unwrap()
    }

    /// Create a todo as `admin_id` and return its id
    pub async fn create_todo(&self, admin_id: i64, title: &str, assigned_to: Option<i64>) -> i64 {
        let response = self
            .post(
                "/todos",
                Some(admin_id),
                serde_json::json!({"title": title, "assigned_to": assigned_to}),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.json()["id"].as_i64().unwrap()
    }
}
