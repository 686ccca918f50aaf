use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Category list shown by clients. Writes are not checked against it;
/// any category string is accepted and matched verbatim.
pub const CATEGORIES: [&str; 11] = [
    "Academic Resources",
    "Career Services",
    "Campus",
    "Culture",
    "Local Community Resources",
    "Social",
    "Sports",
    "Health and Wellness",
    "Technology",
    "Travel",
    "Alumni",
];

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub message: String,
}

/// One post as returned to clients; `email` is the author.
#[derive(Debug, Serialize)]
pub struct PostItem {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<PostItem>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<&'static str>,
}
