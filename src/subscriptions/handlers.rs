use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    error::ApiError,
    state::AppState,
    subscriptions::{
        dto::{SubscribeRequest, SubscribeResponse, SubscriptionsQuery, SubscriptionsResponse},
        repo::Subscription,
    },
};

pub fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(subscribe))
        .route("/user/subscriptions", get(get_subscriptions))
}

#[instrument(skip(state, payload))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".into()));
    }

    let subscription =
        Subscription::upsert(&state.db, &payload.email, &payload.subscriptions).await?;

    info!(
        email = %subscription.email,
        categories = subscription.categories.len(),
        "subscriptions replaced"
    );
    Ok(Json(SubscribeResponse {
        message: "Subscription updated successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_subscriptions(
    State(state): State<AppState>,
    Query(query): Query<SubscriptionsQuery>,
) -> Result<Json<SubscriptionsResponse>, ApiError> {
    let subscription = Subscription::find_by_email(&state.db, &query.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscriptions not found for the user".into()))?;

    Ok(Json(SubscriptionsResponse {
        subscriptions: subscription.categories,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_request_defaults_to_an_empty_list() {
        let payload: SubscribeRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(payload.email, "a@x.com");
        assert!(payload.subscriptions.is_empty());
    }

    #[test]
    fn subscribe_request_keeps_list_order() {
        let payload: SubscribeRequest =
            serde_json::from_str(r#"{"email":"a@x.com","subscriptions":["Sports","Travel"]}"#)
                .unwrap();
        assert_eq!(payload.subscriptions, vec!["Sports", "Travel"]);
    }

    #[test]
    fn subscriptions_response_wraps_the_list() {
        let response = SubscriptionsResponse {
            subscriptions: vec!["Campus".into()],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"subscriptions":["Campus"]}"#);
    }
}
