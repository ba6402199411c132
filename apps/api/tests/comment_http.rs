mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_comments_are_listed_oldest_first() {
    let app = TestApp::new().await;
    let admin = app.signup("admin", "pw").await;
    let bob = app.signup("bob", "pw").await;
    let todo = app.create_todo(admin, "Discuss", Some(bob)).await;
    let uri = format!("/todos/{todo}/comments");

    for (author, content) in [(bob, "first"), (admin, "second"), (bob, "third")] {
        let response = app.post(&uri, Some(author), json!({"content": content})).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        let comment = response.json();
        assert_eq!(comment["todo_id"], todo);
        assert_eq!(comment["user_id"], author);
        assert_eq!(comment["content"], content);
    }

    let response = app.get(&uri, Some(bob)).await;
    assert_eq!(response.status, StatusCode::OK);
    let comments = response.json();
    let listed: Vec<(&str, &str)> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (c["username"].as_str().unwrap(), c["content"].as_str().unwrap()))
        .collect();
    assert_eq!(
        listed,
        vec![("bob", "first"), ("admin", "second"), ("bob", "third")]
    );
}

#[tokio::test]
async fn test_comments_are_ordered_by_timestamp_before_id() {
    let app = TestApp::new().await;
    let admin = app.signup("admin", "pw").await;
    let todo = app.create_todo(admin, "Discuss", None).await;

    // Inserted newest first, so ids run opposite to creation time
    for (content, created_at) in [("newer", "2030-01-01 00:00:00"), ("older", "2020-01-01 00:00:00")] {
        sqlx::query("INSERT INTO comments (todo_id, user_id, content, created_at) VALUES (?, ?, ?, ?)")
            .bind(todo)
            .bind(admin)
            .bind(content)
            .bind(created_at)
            .execute(&app.pool)
            .await
            .unwrap();
    }

    let comments = app.get(&format!("/todos/{todo}/comments"), Some(admin)).await.json();
    let comments = comments.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["content"], "older");
    assert_eq!(comments[1]["content"], "newer");
    assert!(comments[0]["id"].as_i64().unwrap() > comments[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_assignee_without_an_account_cannot_comment() {
    let app = TestApp::new().await;
    let admin = app.signup("admin", "pw").await;
    let ghost = 999;
    let todo = app.create_todo(admin, "Orphaned", Some(ghost)).await;

    assert_eq!(app.get(&format!("/todos/{todo}"), Some(ghost)).await.status, StatusCode::OK);

    let uri = format!("/todos/{todo}/comments");
    let response = app.post(&uri, Some(ghost), json!({"content": "hello"})).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.get(&uri, Some(ghost)).await.json(), json!([]));
}

#[tokio::test]
async fn test_comments_follow_todo_visibility() {
    let app = TestApp::new().await;
    let admin = app.signup("admin", "pw").await;
    let bob = app.signup("bob", "pw").await;
    let carol = app.signup("carol", "pw").await;
    let todo = app.create_todo(admin, "Carol's", Some(carol)).await;
    let uri = format!("/todos/{todo}/comments");

    let response = app.post(&uri, Some(bob), json!({"content": "hi"})).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.get(&uri, Some(bob)).await.status, StatusCode::NOT_FOUND);

    let response = app.post(&uri, None, json!({"content": "hi"})).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    assert_eq!(app.get(&uri, Some(carol)).await.json(), json!([]));
    assert_eq!(app.get(&uri, Some(admin)).await.json(), json!([]));
}

#[tokio::test]
async fn test_comment_on_missing_todo_is_404() {
    let app = TestApp::new().await;
    let admin = app.signup("admin", "pw").await;

    let response = app
        .post("/todos/4242/comments", Some(admin), json!({"content": "hello?"}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blank_comment_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.signup("admin", "pw").await;
    let todo = app.create_todo(admin, "Discuss", None).await;

    let response = app
        .post(&format!("/todos/{todo}/comments"), Some(admin), json!({"content": ""}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deleting_a_todo_removes_its_comments() {
    let app = TestApp::new().await;
    let admin = app.signup("admin", "pw").await;
    let todo = app.create_todo(admin, "Discuss", None).await;
    app.post(
        &format!("/todos/{todo}/comments"),
        Some(admin),
        json!({"content": "bye"}),
    )
    .await;

    app.delete(&format!("/todos/{todo}"), Some(admin)).await;

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
