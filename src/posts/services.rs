use sqlx::PgPool;
use tracing::info;

use crate::notifications::repo::Notification;
use crate::posts::repo::Post;
use crate::subscriptions::repo::Subscription;

/// Create a post and fan a notification out to every subscriber of its
/// category. All three store operations run in one transaction, so a
/// failure at any step leaves neither the post nor the notification
/// behind.
pub async fn create_post_with_fanout(
    db: &PgPool,
    author_email: &str,
    title: &str,
    content: &str,
    category: &str,
) -> sqlx::Result<(Post, Notification)> {
    let mut tx = db.begin().await?;

    let post = Post::create(&mut *tx, author_email, title, content, category).await?;

    // Recipient set is whatever is subscribed at commit time; the
    // notification row is written even when nobody is.
    let recipients = Subscription::emails_subscribed_to(&mut *tx, category).await?;
    let notification = Notification::create(&mut *tx, title, category, &recipients).await?;

    tx.commit().await?;

    info!(
        post_id = %post.id,
        notification_id = %notification.id,
        recipients = notification.recipients.len(),
        "post created and fanned out"
    );
    Ok((post, notification))
}
