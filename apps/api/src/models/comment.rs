use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub todo_id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

const SELECT_COMMENTS: &str = r#"SELECT c.id, c.todo_id, c.user_id, u.username, c.content, c.created_at
    FROM comments c
    JOIN users u ON c.user_id = u.id"#;

impl Comment {
    /// Comments on a todo, oldest first
    pub async fn for_todo(pool: &SqlitePool, todo_id: i64) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!(
            "{SELECT_COMMENTS} WHERE c.todo_id = ? ORDER BY c.created_at ASC, c.id ASC"
        ))
        .bind(todo_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(&format!("{SELECT_COMMENTS} WHERE c.id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        todo_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<i64, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO comments (todo_id, user_id, content) VALUES (?, ?, ?)")
                .bind(todo_id)
                .bind(user_id)
                .bind(content)
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }
}
