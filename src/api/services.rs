//! Service history lookup for car owners.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{HistoryResponse, ServiceRecord};
use crate::AppState;

use super::auth::CarOwner;
use super::error::ApiError;
use super::validation::parse_id;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub vehicle_id: Option<String>,
}

/// Completed service requests for one of the caller's vehicles, newest first
pub async fn get_service_history(
    State(state): State<Arc<AppState>>,
    CarOwner(session): CarOwner,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let vehicle_id = query
        .vehicle_id
        .as_deref()
        .and_then(|v| parse_id(v, "vehicle ID").ok())
        .ok_or_else(|| ApiError::validation("Vehicle ID is required."))?;

    // The vehicle must belong to the caller; a stranger's vehicle looks the
    // same as a missing one.
    let owner: Option<(i64,)> = sqlx::query_as("SELECT owner_id FROM vehicles WHERE id = ?")
        .bind(vehicle_id)
        .fetch_optional(&state.db)
        .await?;
    match owner {
        Some((owner_id,)) if owner_id == session.user_id => {}
        _ => return Err(ApiError::not_found("Vehicle not found.")),
    }

    let history: Vec<ServiceRecord> = sqlx::query_as(
        "SELECT sr.preferred_date, sc.name AS service_category, sr.service_description, sr.actual_cost
         FROM service_requests sr
         JOIN service_categories sc ON sr.service_category_id = sc.id
         WHERE sr.vehicle_id = ? AND sr.status = 'completed'
         ORDER BY sr.preferred_date DESC",
    )
    .bind(vehicle_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(HistoryResponse {
        success: true,
        history,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_util::{get_json, login_as_owner, post_json, test_app};
    use crate::AppState;

    async fn add_vehicle(app: &axum::Router, cookie: &str) -> i64 {
        let body = post_json(
            app,
            "/api/vehicles/add",
            serde_json::json!({
                "make": "1", "model": "1", "year": "2019", "body_style": "1",
                "fuel_type": "1", "transmission": "1", "registration_number": "GR-1234-20"
            }),
            Some(cookie),
        )
        .await;
        body["vehicle_id"].as_i64().unwrap()
    }

    async fn add_service_request(
        state: &AppState,
        vehicle_id: i64,
        date: &str,
        status: &str,
        cost: Option<f64>,
    ) {
        sqlx::query(
            "INSERT INTO service_requests (vehicle_id, service_category_id, preferred_date, service_description, actual_cost, status)
             VALUES (?, 1, ?, 'Routine service', ?, ?)",
        )
        .bind(vehicle_id)
        .bind(date)
        .bind(cost)
        .bind(status)
        .execute(&state.db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn only_completed_requests_newest_first() {
        let (app, state) = test_app().await;
        let cookie = login_as_owner(&app, &state, "+1000").await;
        let vehicle_id = add_vehicle(&app, &cookie).await;

        add_service_request(&state, vehicle_id, "2025-01-10", "completed", Some(120.0)).await;
        add_service_request(&state, vehicle_id, "2025-03-05", "completed", Some(80.0)).await;
        add_service_request(&state, vehicle_id, "2025-04-01", "pending", None).await;

        let uri = format!("/api/services/get-history?vehicle_id={vehicle_id}");
        let body = get_json(&app, &uri, Some(&cookie)).await;
        assert_eq!(body["success"], true);

        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["preferred_date"], "2025-03-05");
        assert_eq!(history[1]["preferred_date"], "2025-01-10");
        assert_eq!(history[0]["service_category"], "Oil Change");
    }

    #[tokio::test]
    async fn rejects_vehicles_owned_by_someone_else() {
        let (app, state) = test_app().await;
        let cookie_a = login_as_owner(&app, &state, "+1000").await;
        let cookie_b = login_as_owner(&app, &state, "+2000").await;
        let vehicle_id = add_vehicle(&app, &cookie_a).await;

        let uri = format!("/api/services/get-history?vehicle_id={vehicle_id}");
        let body = get_json(&app, &uri, Some(&cookie_b)).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Vehicle not found.");
    }

    #[tokio::test]
    async fn requires_a_vehicle_id() {
        let (app, state) = test_app().await;
        let cookie = login_as_owner(&app, &state, "+1000").await;

        let body = get_json(&app, "/api/services/get-history", Some(&cookie)).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Vehicle ID is required.");
    }
}
