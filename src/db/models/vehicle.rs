//! Vehicle records owned by car owners.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A vehicle as listed on the owner dashboard, with catalog names joined in.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OwnedVehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i64,
    pub registration_number: String,
}

/// All id fields arrive as dropdown values, i.e. strings that must parse as
/// integers. They are stored as-is; no existence check against the catalog
/// tables is performed.
#[derive(Debug, Deserialize)]
pub struct AddVehicleRequest {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub body_style: String,
    #[serde(default)]
    pub fuel_type: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default)]
    pub registration_number: String,
}

#[derive(Debug, Serialize)]
pub struct AddVehicleResponse {
    pub success: bool,
    pub message: String,
    pub vehicle_id: i64,
    pub redirect: String,
}

#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub success: bool,
    pub vehicles: Vec<OwnedVehicle>,
}
