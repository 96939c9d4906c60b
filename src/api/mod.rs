pub mod auth;
mod catalog;
mod error;
mod marketplace;
mod services;
mod validation;
mod vehicles;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/verify-phone", post(auth::verify_phone))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/request-password-reset", post(auth::request_password_reset))
        .route("/reset-password", post(auth::reset_password))
        .route("/get-locations", get(catalog::get_locations));

    // Vehicle routes; the catalog is public, the rest guard themselves via
    // the CarOwner extractor
    let vehicle_routes = Router::new()
        .route("/add", post(vehicles::add_vehicle))
        .route("/get", get(vehicles::list_vehicles))
        .route("/get-vehicle-catalog", get(catalog::get_vehicle_catalog));

    let service_routes = Router::new().route("/get-history", get(services::get_service_history));

    let marketplace_routes = Router::new().route("/get-listings", get(marketplace::get_listings));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/vehicles", vehicle_routes)
        .nest("/api/services", service_routes)
        .nest("/api/marketplace", marketplace_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
pub(crate) mod test_util {
    use super::create_router;
    use crate::config::Config;
    use crate::session::{MemorySessionStore, SessionStore};
    use crate::AppState;
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::Response;
    use axum::Router;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;
    use tower::ServiceExt;

    /// A router over a fresh in-memory database with migrations and seeds
    /// applied.
    pub(crate) async fn test_app() -> (Router, Arc<AppState>) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();

        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let state = Arc::new(AppState::new(Config::default(), pool, sessions));
        (create_router(state.clone()), state)
    }

    pub(crate) async fn post_json_raw(
        app: &Router,
        uri: &str,
        body: serde_json::Value,
        cookie: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    pub(crate) async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub(crate) async fn post_json(
        app: &Router,
        uri: &str,
        body: serde_json::Value,
        cookie: Option<&str>,
    ) -> serde_json::Value {
        body_json(post_json_raw(app, uri, body, cookie).await).await
    }

    pub(crate) async fn get_json(
        app: &Router,
        uri: &str,
        cookie: Option<&str>,
    ) -> serde_json::Value {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        let request = builder.body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        body_json(response).await
    }

    /// Register, verify, and log in a car owner; returns the session cookie
    /// pair for subsequent requests.
    pub(crate) async fn login_as_owner(app: &Router, state: &AppState, phone: &str) -> String {
        let body = post_json(
            app,
            "/api/auth/register",
            serde_json::json!({
                "phone": phone, "country": "1", "city": "1", "password": "longenough1"
            }),
            None,
        )
        .await;
        let user_id = body["user_id"].as_i64().unwrap();

        let (code,): (Option<String>,) =
            sqlx::query_as("SELECT phone_verification_code FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_one(&state.db)
                .await
                .unwrap();
        post_json(
            app,
            "/api/auth/verify-phone",
            serde_json::json!({
                "user_id": user_id.to_string(), "verification_code": code.unwrap()
            }),
            None,
        )
        .await;

        let response = post_json_raw(
            app,
            "/api/auth/login",
            serde_json::json!({"phone": phone, "password": "longenough1"}),
            None,
        )
        .await;
        let set_cookie = response
            .headers()
            .get("set-cookie")
            .expect("login should set the session cookie")
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }
}
