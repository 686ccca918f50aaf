use serde::{Deserialize, Serialize};

/// Request body for account creation. Fields are optional so that a
/// missing field surfaces as a validation failure rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

/// Returned on successful login: the stored display name plus a signed
/// access token for the session.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserLookupResponse {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub name: String,
    pub email: String,
    pub role: String,
}
