use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_email: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: OffsetDateTime,
}

impl Post {
    /// Insert a post. Generic over the executor so it can run inside the
    /// fan-out transaction.
    pub async fn create<'e>(
        ex: impl PgExecutor<'e>,
        author_email: &str,
        title: &str,
        content: &str,
        category: &str,
    ) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (author_email, title, content, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_email, title, content, category, created_at
            "#,
        )
        .bind(author_email)
        .bind(title)
        .bind(content)
        .bind(category)
        .fetch_one(ex)
        .await
    }

    pub async fn list_by_category(db: &PgPool, category: &str) -> sqlx::Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, author_email, title, content, category, created_at
            FROM posts
            WHERE category = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(category)
        .fetch_all(db)
        .await
    }
}
