//! Reference-data lookups backing the registration and vehicle forms.

use axum::{extract::State, Json};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::{CityRow, LocationsResponse, ModelRow, RefItem, VehicleCatalogResponse};
use crate::AppState;

use super::error::ApiError;

/// Active countries plus active cities grouped by country id
pub async fn get_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LocationsResponse>, ApiError> {
    let countries: Vec<RefItem> =
        sqlx::query_as("SELECT id, name FROM countries WHERE status = 'active' ORDER BY name ASC")
            .fetch_all(&state.db)
            .await?;

    let all_cities: Vec<CityRow> = sqlx::query_as(
        "SELECT id, name, country_id FROM cities WHERE status = 'active' ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let mut cities: BTreeMap<i64, Vec<RefItem>> = BTreeMap::new();
    for city in all_cities {
        cities.entry(city.country_id).or_default().push(RefItem {
            id: city.id,
            name: city.name,
        });
    }

    Ok(Json(LocationsResponse {
        success: true,
        countries,
        cities,
    }))
}

/// Active makes, models grouped by make, and the flat catalog lists
pub async fn get_vehicle_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<VehicleCatalogResponse>, ApiError> {
    let makes: Vec<RefItem> = sqlx::query_as(
        "SELECT id, name FROM vehicle_makes WHERE status = 'active' ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let all_models: Vec<ModelRow> = sqlx::query_as(
        "SELECT id, name, make_id FROM vehicle_models WHERE status = 'active' ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let mut models: BTreeMap<i64, Vec<RefItem>> = BTreeMap::new();
    for model in all_models {
        models.entry(model.make_id).or_default().push(RefItem {
            id: model.id,
            name: model.name,
        });
    }

    let body_styles: Vec<RefItem> = sqlx::query_as(
        "SELECT id, name FROM vehicle_body_styles WHERE status = 'active' ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let fuel_types: Vec<RefItem> = sqlx::query_as(
        "SELECT id, name FROM vehicle_fuel_types WHERE status = 'active' ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    let transmissions: Vec<RefItem> = sqlx::query_as(
        "SELECT id, name FROM vehicle_transmissions WHERE status = 'active' ORDER BY name ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(VehicleCatalogResponse {
        success: true,
        makes,
        models,
        body_styles,
        fuel_types,
        transmissions,
    }))
}
