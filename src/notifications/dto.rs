use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct NotificationsQuery {
    #[serde(default)]
    pub email: String,
}

/// One notification as shown to a recipient. The stored recipient list
/// stays server-side.
#[derive(Debug, Serialize)]
pub struct NotificationItem {
    pub id: Uuid,
    pub title: String,
    pub category: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<NotificationItem>,
}

#[derive(Debug, Serialize)]
pub struct DeleteNotificationResponse {
    pub message: String,
}
