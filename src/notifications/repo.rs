use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A per-post notification addressed to the subscribers captured when the
/// post was created. The recipient list never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub recipients: Vec<String>,
    pub created_at: OffsetDateTime,
}

impl Notification {
    /// Write one notification for the given recipient list; the list may
    /// be empty. Generic over the executor so the fan-out can run it
    /// inside its transaction.
    pub async fn create<'e>(
        ex: impl PgExecutor<'e>,
        title: &str,
        category: &str,
        recipients: &[String],
    ) -> sqlx::Result<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (title, category, recipients)
            VALUES ($1, $2, $3)
            RETURNING id, title, category, recipients, created_at
            "#,
        )
        .bind(title)
        .bind(category)
        .bind(recipients)
        .fetch_one(ex)
        .await
    }

    /// Every notification whose recipient list contains `email`.
    pub async fn list_for_recipient(db: &PgPool, email: &str) -> sqlx::Result<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, title, category, recipients, created_at
            FROM notifications
            WHERE $1 = ANY(recipients)
            ORDER BY created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(db)
        .await
    }

    /// Remove the row, and with it the notification for every recipient
    /// at once. Returns the number of rows deleted (0 for an unknown id).
    pub async fn delete_by_id(db: &PgPool, id: Uuid) -> sqlx::Result<u64> {
        let result = sqlx::query(r#"DELETE FROM notifications WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
