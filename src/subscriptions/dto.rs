use serde::{Deserialize, Serialize};

/// Request body for subscription updates. The `subscriptions` field is
/// the complete new category list, not a delta.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subscriptions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionsQuery {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionsResponse {
    pub subscriptions: Vec<String>,
}
