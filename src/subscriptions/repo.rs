use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use time::OffsetDateTime;

/// One row per email; the category list is the complete, current
/// subscription set for that address.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub email: String,
    pub categories: Vec<String>,
    pub updated_at: OffsetDateTime,
}

impl Subscription {
    pub async fn find_by_email(db: &PgPool, email: &str) -> sqlx::Result<Option<Subscription>> {
        sqlx::query_as::<_, Subscription>(
            r#"
            SELECT email, categories, updated_at
            FROM subscriptions
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Full replace: an existing row's category list is overwritten,
    /// never merged.
    pub async fn upsert(
        db: &PgPool,
        email: &str,
        categories: &[String],
    ) -> sqlx::Result<Subscription> {
        sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO subscriptions (email, categories)
            VALUES ($1, $2)
            ON CONFLICT (email)
            DO UPDATE SET categories = EXCLUDED.categories, updated_at = now()
            RETURNING email, categories, updated_at
            "#,
        )
        .bind(email)
        .bind(categories)
        .fetch_one(db)
        .await
    }

    /// Emails of every subscription whose category set contains
    /// `category`. Generic over the executor so the fan-out can run it
    /// inside its transaction.
    pub async fn emails_subscribed_to<'e>(
        ex: impl PgExecutor<'e>,
        category: &str,
    ) -> sqlx::Result<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT email
            FROM subscriptions
            WHERE $1 = ANY(categories)
            "#,
        )
        .bind(category)
        .fetch_all(ex)
        .await
    }
}
