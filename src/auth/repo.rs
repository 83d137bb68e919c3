use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::AppError;

/// User record. The password hash never leaves the server in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub image_file: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, image_file, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, image_file, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_username(db: &PgPool, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, image_file, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Insert a new user. Username/email uniqueness is enforced by the
    /// database constraints; a collision surfaces as `AppError::Duplicate`.
    pub async fn create(
        db: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, image_file, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Username/email change for the caller's own record.
    pub async fn update_profile(
        db: &PgPool,
        id: i64,
        username: &str,
        email: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET username = $2, email = $3
            WHERE id = $1
            RETURNING id, username, email, image_file, password_hash, created_at
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn update_password(
        db: &PgPool,
        id: i64,
        password_hash: &str,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            username: "alice".into(),
            email: "a@x.com".into(),
            image_file: "default.jpg".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: datetime!(2024-01-01 00:00:00 UTC),
        };
        let json = serde_json::to_string(&user).expect("serialize");
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("alice"));
    }
}
