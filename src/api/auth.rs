//! Registration, phone verification, login/logout, and password reset.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::request::Parts,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::sync::Arc;
use subtle::ConstantTimeEq;

use crate::db::{
    roles, statuses, LoginRequest, MessageResponse, RedirectResponse, RegisterRequest,
    RegisterResponse, RequestPasswordResetRequest, ResetPasswordRequest, ResetRequestedResponse,
    User, VerifyPhoneRequest,
};
use crate::session::SessionData;
use crate::AppState;

use super::error::ApiError;
use super::validation::{parse_id, validate_code, validate_password, validate_phone};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Generate a random 6-digit verification code
fn generate_verification_code() -> String {
    let code: u32 = rand::rng().random_range(100_000..=999_999);
    code.to_string()
}

/// Expiry timestamp for a code issued now
fn code_expiry(ttl_minutes: i64) -> String {
    (Utc::now() + Duration::minutes(ttl_minutes)).to_rfc3339()
}

/// Whether a stored expiry has passed. Missing or unparseable expiries count
/// as expired.
fn code_expired(expires: Option<&str>) -> bool {
    match expires.and_then(|s| DateTime::parse_from_rfc3339(s).ok()) {
        Some(ts) => Utc::now() > ts.with_timezone(&Utc),
        None => true,
    }
}

/// Constant-time comparison of a stored code against a submitted one
fn code_matches(stored: Option<&str>, submitted: &str) -> bool {
    match stored {
        Some(stored) => {
            stored.len() == submitted.len()
                && stored.as_bytes().ct_eq(submitted.as_bytes()).into()
        }
        None => false,
    }
}

fn session_cookie(name: &str, value: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// -------------------------------------------------------------------------
// Access guards
// -------------------------------------------------------------------------

/// An authenticated session resolved from the request cookie.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: String,
    pub user_id: i64,
    pub user_type: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar
            .get(&state.config.auth.session_cookie)
            .ok_or_else(|| ApiError::unauthorized("Please log in to continue."))?;

        let session_id = cookie.value().to_string();
        let data = state
            .sessions
            .get(&session_id)
            .await
            .ok_or_else(|| ApiError::unauthorized("Please log in to continue."))?;

        if !data.logged_in {
            return Err(ApiError::unauthorized("Please log in to continue."));
        }

        Ok(AuthSession {
            session_id,
            user_id: data.user_id,
            user_type: data.user_type,
        })
    }
}

/// Guard for car-owner-only endpoints. The role must match exactly; there is
/// no hierarchy.
#[derive(Debug, Clone)]
pub struct CarOwner(pub AuthSession);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CarOwner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = AuthSession::from_request_parts(parts, state).await?;
        if session.user_type != roles::CAR_OWNER {
            return Err(ApiError::forbidden("You do not have access to this resource."));
        }
        Ok(CarOwner(session))
    }
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

/// Register a new car owner with a pending phone verification
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if req.phone.is_empty() || req.country.is_empty() || req.city.is_empty() || req.password.is_empty()
    {
        return Err(ApiError::validation("Please fill in all required fields."));
    }

    validate_phone(&req.phone).map_err(ApiError::validation)?;

    let country_id = parse_id(&req.country, "country")
        .map_err(|_| ApiError::validation("Invalid country or city selected."))?;
    let city_id = parse_id(&req.city, "city")
        .map_err(|_| ApiError::validation("Invalid country or city selected."))?;

    validate_password(&req.password).map_err(ApiError::validation)?;

    let verification_code = generate_verification_code();
    let verification_expires = code_expiry(state.config.auth.code_ttl_minutes);

    let password_hash = hash_password(&req.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::database("A database error occurred.")
    })?;

    // Phone uniqueness is enforced by the UNIQUE constraint; the violation
    // is the authoritative conflict signal.
    let result = sqlx::query(
        "INSERT INTO users (phone, country_id, city_id, password_hash, user_type, status, phone_verification_code, phone_verification_expires)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&req.phone)
    .bind(country_id)
    .bind(city_id)
    .bind(&password_hash)
    .bind(roles::CAR_OWNER)
    .bind(statuses::PENDING)
    .bind(&verification_code)
    .bind(&verification_expires)
    .execute(&state.db)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            ApiError::conflict("A user with this phone number already exists.")
        } else {
            tracing::error!("Failed to register user: {}", e);
            ApiError::database("A database error occurred.")
        }
    })?;

    let user_id = result.last_insert_rowid();

    // This is where an SMS gateway would deliver the code.
    tracing::info!(user_id, "Registered car owner, phone verification pending");

    Ok(Json(RegisterResponse {
        success: true,
        message: "Registration successful. Please verify your phone number.".to_string(),
        user_id,
        redirect: format!("/auth/verify-phone?user_id={user_id}"),
    }))
}

/// Verify a pending user's phone with the stored code
pub async fn verify_phone(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyPhoneRequest>,
) -> Result<Json<RedirectResponse>, ApiError> {
    if req.user_id.is_empty() || req.verification_code.is_empty() {
        return Err(ApiError::validation("Missing user ID or verification code."));
    }

    let user_id =
        parse_id(&req.user_id, "user ID").map_err(|_| ApiError::validation("Invalid user ID."))?;
    validate_code(&req.verification_code).map_err(ApiError::validation)?;

    let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT phone_verification_code, phone_verification_expires FROM users WHERE id = ? AND status = ?",
    )
    .bind(user_id)
    .bind(statuses::PENDING)
    .fetch_optional(&state.db)
    .await?;

    let (stored_code, stored_expires) =
        row.ok_or_else(|| ApiError::not_found("Invalid user or account already verified."))?;

    if code_expired(stored_expires.as_deref()) {
        return Err(ApiError::expired(
            "Verification code has expired. Please request a new one.",
        ));
    }

    if !code_matches(stored_code.as_deref(), &req.verification_code) {
        return Err(ApiError::mismatch("Invalid verification code."));
    }

    sqlx::query(
        "UPDATE users SET status = ?, phone_verified = 1, phone_verification_code = NULL, phone_verification_expires = NULL WHERE id = ?",
    )
    .bind(statuses::ACTIVE)
    .bind(user_id)
    .execute(&state.db)
    .await?;

    tracing::info!(user_id, "Phone verified, account activated");

    Ok(Json(RedirectResponse::ok(
        "Phone number verified successfully.",
        "/auth/login",
    )))
}

/// Authenticate by phone and password and establish a session
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<RedirectResponse>), ApiError> {
    if req.phone.is_empty() || req.password.is_empty() {
        return Err(ApiError::validation(
            "Please enter your phone number and password.",
        ));
    }

    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE phone = ?")
        .bind(&req.phone)
        .fetch_optional(&state.db)
        .await?;

    let user = user
        .ok_or_else(|| ApiError::invalid_credentials("Invalid phone number or password."))?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::invalid_credentials(
            "Invalid phone number or password.",
        ));
    }

    if user.status != statuses::ACTIVE {
        let message = match user.status.as_str() {
            statuses::PENDING => "Please verify your phone number before logging in.",
            statuses::SUSPENDED => "Your account has been suspended.",
            _ => "Your account is not active. Please contact support.",
        };
        return Err(ApiError::account_not_active(message));
    }

    let session_id = uuid::Uuid::new_v4().to_string();
    state
        .sessions
        .insert(
            &session_id,
            SessionData {
                user_id: user.id,
                user_type: user.user_type.clone(),
                logged_in: true,
            },
        )
        .await;

    let now = Utc::now().to_rfc3339();
    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(&now)
        .bind(user.id)
        .execute(&state.db)
        .await?;

    tracing::info!(user_id = user.id, "User logged in");

    let cookie = session_cookie(&state.config.auth.session_cookie, session_id);
    Ok((
        jar.add(cookie),
        Json(RedirectResponse::ok(
            "Login successful.",
            format!("/dashboard/{}", user.user_type),
        )),
    ))
}

/// Clear the caller's session
pub async fn logout(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let cookie_name = state.config.auth.session_cookie.clone();
    if let Some(cookie) = jar.get(&cookie_name) {
        state.sessions.remove(cookie.value()).await;
    }

    let removal = Cookie::build((cookie_name, "")).path("/").build();
    (
        jar.remove(removal),
        Json(MessageResponse::ok("Logged out.")),
    )
}

/// Issue a password reset code. Always reports success so the endpoint cannot
/// be used to probe which phone numbers are registered.
pub async fn request_password_reset(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RequestPasswordResetRequest>,
) -> Result<Json<ResetRequestedResponse>, ApiError> {
    if req.phone.is_empty() {
        return Err(ApiError::validation("Please enter your phone number."));
    }

    let user: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE phone = ?")
        .bind(&req.phone)
        .fetch_optional(&state.db)
        .await?;

    let Some((user_id,)) = user else {
        return Ok(Json(ResetRequestedResponse {
            success: true,
            message: "If a user with that phone number exists, a reset code has been sent."
                .to_string(),
            redirect: None,
        }));
    };

    let reset_code = generate_verification_code();
    let reset_expires = code_expiry(state.config.auth.code_ttl_minutes);

    // Overwrites any previous verification fields regardless of status
    sqlx::query(
        "UPDATE users SET phone_verification_code = ?, phone_verification_expires = ? WHERE id = ?",
    )
    .bind(&reset_code)
    .bind(&reset_expires)
    .bind(user_id)
    .execute(&state.db)
    .await?;

    tracing::info!(user_id, "Password reset code issued");

    Ok(Json(ResetRequestedResponse {
        success: true,
        message: "A password reset code has been sent to your phone.".to_string(),
        redirect: Some(format!("/auth/reset-password?user_id={user_id}")),
    }))
}

/// Set a new password after validating the reset code
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<RedirectResponse>, ApiError> {
    if req.user_id.is_empty()
        || req.verification_code.is_empty()
        || req.new_password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(ApiError::validation("Please fill in all fields."));
    }

    let user_id =
        parse_id(&req.user_id, "user ID").map_err(|_| ApiError::validation("Invalid user ID."))?;

    // Password rules apply regardless of code validity
    if req.new_password != req.confirm_password {
        return Err(ApiError::validation("Passwords do not match."));
    }
    validate_password(&req.new_password).map_err(ApiError::validation)?;
    validate_code(&req.verification_code).map_err(ApiError::validation)?;

    let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
        "SELECT phone_verification_code, phone_verification_expires FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await?;

    // An unknown user and a wrong code are indistinguishable to the caller
    let Some((stored_code, stored_expires)) = row else {
        return Err(ApiError::mismatch("Invalid verification code."));
    };

    if !code_matches(stored_code.as_deref(), &req.verification_code) {
        return Err(ApiError::mismatch("Invalid verification code."));
    }

    if code_expired(stored_expires.as_deref()) {
        return Err(ApiError::expired("The reset code has expired."));
    }

    let password_hash = hash_password(&req.new_password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        ApiError::database("A database error occurred.")
    })?;

    sqlx::query(
        "UPDATE users SET password_hash = ?, phone_verification_code = NULL, phone_verification_expires = NULL WHERE id = ?",
    )
    .bind(&password_hash)
    .bind(user_id)
    .execute(&state.db)
    .await?;

    tracing::info!(user_id, "Password reset completed");

    Ok(Json(RedirectResponse::ok(
        "Your password has been reset successfully.",
        "/auth/login",
    )))
}
