//! Service history records.

use serde::Serialize;
use sqlx::FromRow;

/// A completed service request as shown in a vehicle's history.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ServiceRecord {
    pub preferred_date: String,
    pub service_category: String,
    pub service_description: String,
    pub actual_cost: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<ServiceRecord>,
}
