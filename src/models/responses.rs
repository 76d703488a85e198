use serde::{Deserialize, Serialize};

use crate::models::domain::MatchResult;

/// Response for the ideal-city endpoint
pub type FindCityResponse = MatchResult;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "citiesLoaded")]
    pub cities_loaded: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
