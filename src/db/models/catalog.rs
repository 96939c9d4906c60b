//! Reference-data rows backing the registration and vehicle forms.

use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;

/// A reference row as surfaced to dropdown consumers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RefItem {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct CityRow {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct ModelRow {
    pub id: i64,
    pub name: String,
    pub make_id: i64,
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub success: bool,
    pub countries: Vec<RefItem>,
    /// Cities keyed by country id, preserving the name-ascending query order
    pub cities: BTreeMap<i64, Vec<RefItem>>,
}

#[derive(Debug, Serialize)]
pub struct VehicleCatalogResponse {
    pub success: bool,
    pub makes: Vec<RefItem>,
    /// Models keyed by make id, preserving the name-ascending query order
    pub models: BTreeMap<i64, Vec<RefItem>>,
    pub body_styles: Vec<RefItem>,
    pub fuel_types: Vec<RefItem>,
    pub transmissions: Vec<RefItem>,
}
