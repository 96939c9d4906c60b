//! Public marketplace listings.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::db::{Listing, ListingRow, ListingsResponse};
use crate::AppState;

use super::error::ApiError;

/// Active listings with make/model/city names joined, newest first
pub async fn get_listings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListingsResponse>, ApiError> {
    let rows: Vec<ListingRow> = sqlx::query_as(
        "SELECT vl.id, vl.price, vl.mileage, vl.images, vm.name AS make, vmo.name AS model, vl.year, c.name AS city
         FROM vehicle_listings vl
         JOIN vehicle_makes vm ON vl.make_id = vm.id
         JOIN vehicle_models vmo ON vl.model_id = vmo.id
         JOIN cities c ON vl.location_city_id = c.id
         WHERE vl.status = 'active'
         ORDER BY vl.created_at DESC",
    )
    .fetch_all(&state.db)
    .await?;

    let listings = rows.into_iter().map(Listing::from).collect();

    Ok(Json(ListingsResponse {
        success: true,
        listings,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::test_util::{get_json, test_app};
    use crate::AppState;

    async fn add_listing(
        state: &AppState,
        price: f64,
        images: Option<&str>,
        status: &str,
        created_at: &str,
    ) {
        sqlx::query(
            "INSERT INTO vehicle_listings (price, mileage, images, make_id, model_id, year, location_city_id, status, created_at)
             VALUES (?, 50000, ?, 1, 1, 2018, 1, ?, ?)",
        )
        .bind(price)
        .bind(images)
        .bind(status)
        .bind(created_at)
        .execute(&state.db)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn surfaces_only_active_listings_newest_first() {
        let (app, state) = test_app().await;

        add_listing(&state, 10000.0, Some(r#"["a.jpg","b.jpg"]"#), "active", "2025-01-01 10:00:00").await;
        add_listing(&state, 20000.0, None, "active", "2025-02-01 10:00:00").await;
        add_listing(&state, 30000.0, None, "sold", "2025-03-01 10:00:00").await;

        let body = get_json(&app, "/api/marketplace/get-listings", None).await;
        assert_eq!(body["success"], true);

        let listings = body["listings"].as_array().unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0]["price"], 20000.0);
        assert_eq!(listings[1]["price"], 10000.0);

        // Joined names come from the seeded catalog
        assert_eq!(listings[0]["make"], "Toyota");
        assert_eq!(listings[0]["model"], "Corolla");
        assert_eq!(listings[0]["city"], "Accra");

        // Image decode: ordered array, or empty sequence when NULL
        let images = listings[1]["images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0], "a.jpg");
        assert_eq!(images[1], "b.jpg");
        assert_eq!(listings[0]["images"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn empty_marketplace_is_an_empty_list() {
        let (app, _state) = test_app().await;

        let body = get_json(&app, "/api/marketplace/get-listings", None).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["listings"].as_array().unwrap().len(), 0);
    }
}
