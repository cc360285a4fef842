//! Credential store operations
//!
//! Passwords are stored and compared as plaintext strings. There is no
//! hashing or salting; DESIGN.md records this as a known weakness.

use sqlx::SqlitePool;

use crate::error::Result;

/// Credential repository
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Look up the stored password for a username
    pub async fn lookup(&self, username: &str) -> Result<Option<String>> {
        let password = sqlx::query_scalar::<_, String>(
            r#"
            SELECT password FROM users WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(password)
    }

    /// Insert a new credential
    ///
    /// Returns false when the username is already taken. SQLite serializes
    /// writes, so concurrent registrations cannot both succeed.
    pub async fn insert(&self, username: &str, password: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password)
            VALUES (?, ?)
            ON CONFLICT(username) DO NOTHING
            "#,
        )
        .bind(username)
        .bind(password)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count registered users
    pub async fn count(&self) -> Result<i64> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM users
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(result.0)
    }
}
