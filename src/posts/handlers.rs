use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::repo_types::User,
    error::ApiError,
    posts::{
        dto::{
            CategoriesResponse, CreatePostRequest, CreatePostResponse, PostItem, PostsResponse,
            CATEGORIES,
        },
        repo::Post,
        services,
    },
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/posts/:category", get(list_posts))
        .route("/categories", get(list_categories))
}

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/create-post", post(create_post))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), ApiError> {
    if User::find_by_email(&state.db, &payload.email).await?.is_none() {
        warn!(email = %payload.email, "create post for unknown author");
        return Err(ApiError::Validation("User not found".into()));
    }

    services::create_post_with_fanout(
        &state.db,
        &payload.email,
        &payload.title,
        &payload.content,
        &payload.category,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Post created successfully".into(),
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<PostsResponse>, ApiError> {
    let posts = Post::list_by_category(&state.db, &category)
        .await?
        .into_iter()
        .map(|p| PostItem {
            id: p.id,
            title: p.title,
            content: p.content,
            category: p.category,
            email: p.author_email,
            created_at: p.created_at,
        })
        .collect();

    Ok(Json(PostsResponse { posts }))
}

pub async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: CATEGORIES.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_list_matches_the_client_enumeration() {
        assert_eq!(CATEGORIES.len(), 11);
        assert!(CATEGORIES.contains(&"Sports"));
        assert!(CATEGORIES.contains(&"Health and Wellness"));
        assert!(CATEGORIES.contains(&"Alumni"));
    }

    #[test]
    fn create_post_request_defaults_missing_fields() {
        let payload: CreatePostRequest =
            serde_json::from_str(r#"{"email":"b@x.com","title":"Game Day"}"#).unwrap();
        assert_eq!(payload.email, "b@x.com");
        assert_eq!(payload.title, "Game Day");
        assert_eq!(payload.content, "");
        assert_eq!(payload.category, "");
    }

    #[test]
    fn post_item_serializes_author_under_email() {
        let item = PostItem {
            id: uuid::Uuid::new_v4(),
            title: "Game Day".into(),
            content: "Kickoff at noon".into(),
            category: "Sports".into(),
            email: "b@x.com".into(),
            created_at: time::OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""email":"b@x.com""#));
        assert!(json.contains("Game Day"));
    }
}
