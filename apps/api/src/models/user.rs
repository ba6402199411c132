use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A user's role. The first account created is an admin, every later one a
/// regular user; there is no way to change a role afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
}

/// A user row including the stored password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: i64,
    pub username: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub password_hash: String,
}

impl From<UserCredentials> for User {
    fn from(credentials: UserCredentials) -> Self {
        User {
            id: credentials.id,
            username: credentials.username,
            role: credentials.role,
        }
    }
}

/// Identifier and role assigned to a freshly created account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAccount {
    pub id: i64,
    pub role: Role,
}

impl User {
    pub async fn all(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, username, role FROM users ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn credentials_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<UserCredentials>, sqlx::Error> {
        sqlx::query_as::<_, UserCredentials>(
            "SELECT id, username, role, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    pub async fn role_of(pool: &SqlitePool, user_id: i64) -> Result<Option<Role>, sqlx::Error> {
        let role: Option<String> = sqlx::query_scalar("SELECT role FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(role.and_then(|role| role.parse().ok()))
    }

    /// Insert a new account. The role is decided in the same statement: the
    /// account becomes admin only when the table is empty.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<NewAccount, sqlx::Error> {
        let (id, role): (i64, String) = sqlx::query_as(
            r#"INSERT INTO users (username, password_hash, role)
               SELECT ?, ?, CASE WHEN COUNT(*) = 0 THEN 'admin' ELSE 'user' END FROM users
               RETURNING id, role"#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .await?;

        let role = role.parse().map_err(|err: UnknownRole| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(err),
        })?;

        Ok(NewAccount { id, role })
    }
}
