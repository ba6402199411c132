use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// Todo as returned by the API. Unassigned todos carry `assigned_to = 0`
/// and an empty `assigned_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub assigned_to: i64,
    pub assigned_name: String,
    pub created_at: NaiveDateTime,
}

/// Which todos a caller may see and touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoScope {
    /// Admins see every todo
    All,
    /// Everyone else sees only todos assigned to them
    AssignedTo(i64),
}

const SELECT_TODOS: &str = r#"SELECT t.id, t.title, t.completed,
        COALESCE(t.assigned_to, 0) AS assigned_to,
        COALESCE(u.username, '') AS assigned_name,
        t.created_at
    FROM todos t
    LEFT JOIN users u ON t.assigned_to = u.id"#;

impl TodoScope {
    /// Append the visibility filter. `has_where` tells whether the query
    /// already carries a WHERE clause.
    fn push_filter<'a>(&self, query: &mut QueryBuilder<'a, Sqlite>, column: &str, has_where: bool) {
        if let TodoScope::AssignedTo(user_id) = *self {
            query.push(if has_where { " AND " } else { " WHERE " });
            query.push(column);
            query.push(" = ");
            query.push_bind(user_id);
        }
    }
}

/// Fields of a todo that may change after creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl Todo {
    pub async fn list(pool: &SqlitePool, scope: TodoScope) -> Result<Vec<Todo>, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_TODOS);
        scope.push_filter(&mut query, "t.assigned_to", false);
        query.push(" ORDER BY t.id");

        query.build_query_as::<Todo>().fetch_all(pool).await
    }

    pub async fn find(
        pool: &SqlitePool,
        id: i64,
        scope: TodoScope,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_TODOS);
        query.push(" WHERE t.id = ");
        query.push_bind(id);
        scope.push_filter(&mut query, "t.assigned_to", true);

        query.build_query_as::<Todo>().fetch_optional(pool).await
    }

    /// Insert a todo and return its identifier. `assigned_to` is stored as
    /// given, without checking that the user exists.
    pub async fn create(
        pool: &SqlitePool,
        title: &str,
        assigned_to: Option<i64>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO todos (title, assigned_to) VALUES (?, ?)")
            .bind(title)
            .bind(assigned_to)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Apply `changes` to a visible todo. Returns false when no such todo
    /// exists within `scope`.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        scope: TodoScope,
        changes: TodoChanges,
    ) -> Result<bool, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new("UPDATE todos SET title = COALESCE(");
        query.push_bind(changes.title);
        query.push(", title), completed = COALESCE(");
        query.push_bind(changes.completed);
        query.push(", completed) WHERE id = ");
        query.push_bind(id);
        scope.push_filter(&mut query, "assigned_to", true);

        let result = query.build().execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a visible todo. Deleting something that is absent or out of
    /// scope is not an error.
    pub async fn delete(pool: &SqlitePool, id: i64, scope: TodoScope) -> Result<u64, sqlx::Error> {
        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM todos WHERE id = ");
        query.push_bind(id);
        scope.push_filter(&mut query, "assigned_to", true);

        let result = query.build().execute(pool).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(scope: TodoScope) -> String {
        let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM todos WHERE id = ?");
        scope.push_filter(&mut query, "assigned_to", true);
        query.into_sql()
    }

    #[test]
    fn test_admin_scope_adds_no_filter() {
        assert_eq!(sql_for(TodoScope::All), "SELECT * FROM todos WHERE id = ?");
    }

    #[test]
    fn test_assignee_scope_filters_by_assignee() {
        assert_eq!(
            sql_for(TodoScope::AssignedTo(3)),
            "SELECT * FROM todos WHERE id = ? AND assigned_to = ?"
        );

        let mut query = QueryBuilder::<Sqlite>::new(SELECT_TODOS);
        TodoScope::AssignedTo(3).push_filter(&mut query, "t.assigned_to", false);
        assert!(query.sql().ends_with("WHERE t.assigned_to = ?"));
    }
}
