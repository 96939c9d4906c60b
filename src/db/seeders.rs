//! Database seeders for reference data
//!
//! Countries, cities, and the vehicle catalog are read-only from the
//! application's perspective; they are inserted here with fixed ids so
//! dropdown values stay stable across deployments.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Seed reference data (runs on every startup; existing rows are kept)
pub async fn seed_reference_data(pool: &SqlitePool) -> Result<()> {
    info!("Seeding reference data...");

    let countries: Vec<(i64, &str)> = vec![
        (1, "Ghana"),
        (2, "Nigeria"),
        (3, "United Kingdom"),
    ];
    for (id, name) in countries {
        sqlx::query("INSERT OR IGNORE INTO countries (id, name, status) VALUES (?, ?, 'active')")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }

    let cities: Vec<(i64, &str, i64)> = vec![
        (1, "Accra", 1),
        (2, "Kumasi", 1),
        (3, "Takoradi", 1),
        (4, "Lagos", 2),
        (5, "Abuja", 2),
        (6, "Ibadan", 2),
        (7, "London", 3),
        (8, "Manchester", 3),
    ];
    for (id, name, country_id) in cities {
        sqlx::query(
            "INSERT OR IGNORE INTO cities (id, name, country_id, status) VALUES (?, ?, ?, 'active')",
        )
        .bind(id)
        .bind(name)
        .bind(country_id)
        .execute(pool)
        .await?;
    }

    let makes: Vec<(i64, &str)> = vec![
        (1, "Toyota"),
        (2, "Honda"),
        (3, "Nissan"),
        (4, "Hyundai"),
        (5, "Kia"),
    ];
    for (id, name) in makes {
        sqlx::query("INSERT OR IGNORE INTO vehicle_makes (id, name, status) VALUES (?, ?, 'active')")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }

    let models: Vec<(i64, &str, i64)> = vec![
        (1, "Corolla", 1),
        (2, "Camry", 1),
        (3, "RAV4", 1),
        (4, "Civic", 2),
        (5, "Accord", 2),
        (6, "CR-V", 2),
        (7, "Altima", 3),
        (8, "Sentra", 3),
        (9, "Elantra", 4),
        (10, "Tucson", 4),
        (11, "Sportage", 5),
        (12, "Rio", 5),
    ];
    for (id, name, make_id) in models {
        sqlx::query(
            "INSERT OR IGNORE INTO vehicle_models (id, name, make_id, status) VALUES (?, ?, ?, 'active')",
        )
        .bind(id)
        .bind(name)
        .bind(make_id)
        .execute(pool)
        .await?;
    }

    let body_styles: Vec<(i64, &str)> = vec![
        (1, "Sedan"),
        (2, "SUV"),
        (3, "Hatchback"),
        (4, "Coupe"),
        (5, "Pickup"),
        (6, "Van"),
    ];
    for (id, name) in body_styles {
        sqlx::query(
            "INSERT OR IGNORE INTO vehicle_body_styles (id, name, status) VALUES (?, ?, 'active')",
        )
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    }

    let fuel_types: Vec<(i64, &str)> = vec![
        (1, "Petrol"),
        (2, "Diesel"),
        (3, "Hybrid"),
        (4, "Electric"),
    ];
    for (id, name) in fuel_types {
        sqlx::query(
            "INSERT OR IGNORE INTO vehicle_fuel_types (id, name, status) VALUES (?, ?, 'active')",
        )
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    }

    let transmissions: Vec<(i64, &str)> = vec![
        (1, "Automatic"),
        (2, "Manual"),
        (3, "CVT"),
    ];
    for (id, name) in transmissions {
        sqlx::query(
            "INSERT OR IGNORE INTO vehicle_transmissions (id, name, status) VALUES (?, ?, 'active')",
        )
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    }

    let service_categories: Vec<(i64, &str)> = vec![
        (1, "Oil Change"),
        (2, "Brake Service"),
        (3, "Tire Rotation"),
        (4, "Engine Diagnostics"),
        (5, "Battery Replacement"),
        (6, "General Inspection"),
    ];
    for (id, name) in service_categories {
        sqlx::query(
            "INSERT OR IGNORE INTO service_categories (id, name, status) VALUES (?, ?, 'active')",
        )
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    }

    Ok(())
}
