use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, MeResponse, SignupRequest, SignupResponse,
            UserLookupResponse,
        },
        jwt::{AuthUser, JwtKeys},
        password,
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
};

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/user/:email", get(lookup_user))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn require(field: Option<String>) -> Result<String, ApiError> {
    match field {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation("All fields are required".into())),
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let name = require(payload.name)?;
    let email = require(payload.email)?;
    let password = require(payload.password)?;
    let role = require(payload.role)?;

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(%email, "signup with existing email");
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    let hash = password::hash_password(&password)?;

    let user = match User::create(&state.db, &name, &email, &hash, &role).await {
        Ok(u) => u,
        // The unique index on users.email closes the window between the
        // read above and this insert.
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            warn!(%email, "signup lost duplicate-email race");
            return Err(ApiError::Conflict("Email already exists".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User signed up successfully".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "login with unknown email");
            ApiError::Auth("Invalid email or password".into())
        })?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with invalid password");
        return Err(ApiError::Auth("Invalid email or password".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        name: user.name,
        token,
    }))
}

#[instrument(skip(state))]
pub async fn lookup_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserLookupResponse>, ApiError> {
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UserLookupResponse {
        name: user.name,
        email: user.email,
    }))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(MeResponse {
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_accepts_non_empty_fields() {
        assert_eq!(require(Some("Alice".into())).unwrap(), "Alice");
    }

    #[test]
    fn require_rejects_missing_fields() {
        assert!(require(None).is_err());
    }

    #[test]
    fn require_rejects_empty_and_blank_fields() {
        assert!(require(Some(String::new())).is_err());
        assert!(require(Some("   ".into())).is_err());
    }

    #[test]
    fn login_response_carries_name_and_token() {
        let response = LoginResponse {
            message: "Login successful".into(),
            name: "Alice".into(),
            token: "header.payload.signature".into(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("Alice"));
        assert!(json.contains("header.payload.signature"));
    }

    #[test]
    fn signup_request_tolerates_missing_fields() {
        let payload: SignupRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(payload.email.as_deref(), Some("a@x.com"));
        assert!(payload.name.is_none());
        assert!(payload.password.is_none());
        assert!(payload.role.is_none());
    }
}
