//! User account model and auth request/response types.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Role strings stored in `users.user_type`.
pub mod roles {
    pub const CAR_OWNER: &str = "car_owner";
}

/// Lifecycle values stored in `users.status`.
pub mod statuses {
    pub const PENDING: &str = "pending";
    pub const ACTIVE: &str = "active";
    pub const SUSPENDED: &str = "suspended";
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub phone: String,
    pub country_id: i64,
    pub city_id: i64,
    pub password_hash: String,
    pub user_type: String,
    pub status: String,
    pub phone_verified: bool,
    pub phone_verification_code: Option<String>,
    pub phone_verification_expires: Option<String>,
    pub last_login: Option<String>,
    pub created_at: String,
}

// Form-backed clients submit every field as a string, so numeric ids arrive
// as text and are parsed server-side. Missing fields default to empty and
// fail the required-field check rather than the JSON decode.

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user_id: i64,
    pub redirect: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPhoneRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub verification_code: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RequestPasswordResetRequest {
    #[serde(default)]
    pub phone: String,
}

/// Reset requests always report success; the redirect is only present when
/// the phone matched an account.
#[derive(Debug, Serialize)]
pub struct ResetRequestedResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub verification_code: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}
