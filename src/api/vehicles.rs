//! Vehicle registration and listing for car owners.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::{AddVehicleRequest, AddVehicleResponse, OwnedVehicle, VehiclesResponse};
use crate::AppState;

use super::auth::CarOwner;
use super::error::ApiError;
use super::validation::parse_id;

/// Register a vehicle for the authenticated owner
pub async fn add_vehicle(
    State(state): State<Arc<AppState>>,
    CarOwner(session): CarOwner,
    Json(req): Json<AddVehicleRequest>,
) -> Result<Json<AddVehicleResponse>, ApiError> {
    if req.make.is_empty()
        || req.model.is_empty()
        || req.year.is_empty()
        || req.body_style.is_empty()
        || req.fuel_type.is_empty()
        || req.transmission.is_empty()
        || req.registration_number.is_empty()
    {
        return Err(ApiError::validation("Please fill in all required fields."));
    }

    let make_id = parse_id(&req.make, "make").map_err(ApiError::validation)?;
    let model_id = parse_id(&req.model, "model").map_err(ApiError::validation)?;
    let year = parse_id(&req.year, "year").map_err(ApiError::validation)?;
    let body_style_id = parse_id(&req.body_style, "body style").map_err(ApiError::validation)?;
    let fuel_type_id = parse_id(&req.fuel_type, "fuel type").map_err(ApiError::validation)?;
    let transmission_id =
        parse_id(&req.transmission, "transmission").map_err(ApiError::validation)?;

    let result = sqlx::query(
        "INSERT INTO vehicles (owner_id, make_id, model_id, year, body_style_id, fuel_type_id, transmission_id, registration_number)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(session.user_id)
    .bind(make_id)
    .bind(model_id)
    .bind(year)
    .bind(body_style_id)
    .bind(fuel_type_id)
    .bind(transmission_id)
    .bind(&req.registration_number)
    .execute(&state.db)
    .await?;

    let vehicle_id = result.last_insert_rowid();
    tracing::info!(owner_id = session.user_id, vehicle_id, "Vehicle added");

    Ok(Json(AddVehicleResponse {
        success: true,
        message: "Vehicle added successfully.".to_string(),
        vehicle_id,
        redirect: "/dashboard/owner/vehicles".to_string(),
    }))
}

/// List the authenticated owner's vehicles, ordered by make then model
pub async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    CarOwner(session): CarOwner,
) -> Result<Json<VehiclesResponse>, ApiError> {
    let vehicles: Vec<OwnedVehicle> = sqlx::query_as(
        "SELECT v.id, vm.name AS make, vmo.name AS model, v.year, v.registration_number
         FROM vehicles v
         JOIN vehicle_makes vm ON v.make_id = vm.id
         JOIN vehicle_models vmo ON v.model_id = vmo.id
         WHERE v.owner_id = ?
         ORDER BY vm.name, vmo.name",
    )
    .bind(session.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(VehiclesResponse {
        success: true,
        vehicles,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_util::{get_json, login_as_owner, post_json, test_app};

    #[tokio::test]
    async fn add_requires_authentication() {
        let (app, _state) = test_app().await;

        let body = post_json(
            &app,
            "/api/vehicles/add",
            serde_json::json!({
                "make": "1", "model": "1", "year": "2019", "body_style": "1",
                "fuel_type": "1", "transmission": "1", "registration_number": "GR-1234-20"
            }),
            None,
        )
        .await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Please log in to continue.");
    }

    #[tokio::test]
    async fn add_rejects_non_integer_ids() {
        let (app, state) = test_app().await;
        let cookie = login_as_owner(&app, &state, "+1000").await;

        let body = post_json(
            &app,
            "/api/vehicles/add",
            serde_json::json!({
                "make": "toyota", "model": "1", "year": "2019", "body_style": "1",
                "fuel_type": "1", "transmission": "1", "registration_number": "GR-1234-20"
            }),
            Some(&cookie),
        )
        .await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid make value.");
    }

    #[tokio::test]
    async fn add_then_list_with_joined_names() {
        let (app, state) = test_app().await;
        let cookie = login_as_owner(&app, &state, "+1000").await;

        let body = post_json(
            &app,
            "/api/vehicles/add",
            serde_json::json!({
                "make": "1", "model": "2", "year": "2019", "body_style": "1",
                "fuel_type": "1", "transmission": "1", "registration_number": "GR-1234-20"
            }),
            Some(&cookie),
        )
        .await;
        assert_eq!(body["success"], true);
        assert!(body["vehicle_id"].as_i64().unwrap() > 0);

        let body = post_json(
            &app,
            "/api/vehicles/add",
            serde_json::json!({
                "make": "2", "model": "4", "year": "2021", "body_style": "1",
                "fuel_type": "1", "transmission": "1", "registration_number": "GR-5678-21"
            }),
            Some(&cookie),
        )
        .await;
        assert_eq!(body["success"], true);

        let body = get_json(&app, "/api/vehicles/get", Some(&cookie)).await;
        assert_eq!(body["success"], true);
        let vehicles = body["vehicles"].as_array().unwrap();
        assert_eq!(vehicles.len(), 2);
        // Ordered by make name: Honda before Toyota
        assert_eq!(vehicles[0]["make"], "Honda");
        assert_eq!(vehicles[0]["model"], "Civic");
        assert_eq!(vehicles[1]["make"], "Toyota");
        assert_eq!(vehicles[1]["model"], "Camry");
    }

    #[tokio::test]
    async fn listing_is_scoped_to_the_owner() {
        let (app, state) = test_app().await;
        let cookie_a = login_as_owner(&app, &state, "+1000").await;
        let cookie_b = login_as_owner(&app, &state, "+2000").await;

        post_json(
            &app,
            "/api/vehicles/add",
            serde_json::json!({
                "make": "1", "model": "1", "year": "2018", "body_style": "1",
                "fuel_type": "1", "transmission": "1", "registration_number": "GR-0001-18"
            }),
            Some(&cookie_a),
        )
        .await;

        let body = get_json(&app, "/api/vehicles/get", Some(&cookie_b)).await;
        assert_eq!(body["vehicles"].as_array().unwrap().len(), 0);
    }
}
