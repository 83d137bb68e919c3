use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use crate::error::AppError;

/// Post record. `date_posted` is set once at creation; updates touch
/// title and content only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub date_posted: OffsetDateTime,
    pub user_id: i64,
}

impl Post {
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, date_posted, user_id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(post)
    }

    pub async fn find(db: &PgPool, id: i64) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, date_posted, user_id
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(post)
    }

    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, date_posted, user_id
            FROM posts
            ORDER BY date_posted DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, date_posted, user_id
            FROM posts
            WHERE user_id = $1
            ORDER BY date_posted DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Title/content only; `date_posted` and `user_id` are immutable.
    pub async fn update(
        db: &PgPool,
        id: i64,
        title: &str,
        content: &str,
    ) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts SET title = $2, content = $3
            WHERE id = $1
            RETURNING id, title, content, date_posted, user_id
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(post)
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }
}
