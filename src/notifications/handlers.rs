use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    notifications::{
        dto::{
            DeleteNotificationResponse, NotificationItem, NotificationsQuery,
            NotificationsResponse,
        },
        repo::Notification,
    },
    state::AppState,
};

pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/:id", delete(delete_notification))
}

#[instrument(skip(state))]
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationsQuery>,
) -> Result<Json<NotificationsResponse>, ApiError> {
    let notifications = Notification::list_for_recipient(&state.db, &query.email)
        .await?
        .into_iter()
        .map(|n| NotificationItem {
            id: n.id,
            title: n.title,
            category: n.category,
            created_at: n.created_at,
        })
        .collect();

    Ok(Json(NotificationsResponse { notifications }))
}

#[instrument(skip(state))]
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteNotificationResponse>, ApiError> {
    let deleted = Notification::delete_by_id(&state.db, id).await?;
    if deleted == 0 {
        warn!(%id, "delete of unknown notification");
        return Err(ApiError::NotFound("Notification not found".into()));
    }

    // Removal is global: the row is gone for every recipient, not just
    // the one who dismissed it.
    info!(%id, "notification deleted");
    Ok(Json(DeleteNotificationResponse {
        message: "Notification deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_item_does_not_expose_recipients() {
        let item = NotificationItem {
            id: Uuid::new_v4(),
            title: "Game Day".into(),
            category: "Sports".into(),
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("Game Day"));
        assert!(!json.contains("recipients"));
    }

    #[test]
    fn notifications_query_defaults_email() {
        let query: NotificationsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.email, "");
    }
}
