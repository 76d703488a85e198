use crate::core::dataset::query_escape;
use crate::models::City;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default endpoint of the city indices API
pub const DEFAULT_BASE_URL: &str = "http://www.numbeo.com:8008/api/indices";

/// Errors that can occur when fetching city indices
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Response field feeding each fetched index
const CRIME_FIELD: &str = "crime_index";
const COST_OF_LIVING_FIELD: &str = "cpi_and_rent_index";
const HEALTHCARE_FIELD: &str = "health_care_index";
const POLLUTION_FIELD: &str = "pollution_index";

/// Client for the city indices API
///
/// Fills in crime, cost of living, healthcare and pollution indices for a
/// city. Enrichment is best-effort: every failure is logged and turned into
/// zeroed indices.
#[derive(Debug, Clone)]
pub struct IndexClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl IndexClient {
    /// Create a new index client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EnrichmentError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key: api_key.filter(|key| !key.is_empty()),
            client,
        })
    }

    /// Build the request URL for a city name
    pub fn request_url(&self, city_name: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let query = query_escape(city_name);

        match &self.api_key {
            Some(key) => format!("{}?api_key={}&query={}", base, key, query),
            None => format!("{}?query={}", base, query),
        }
    }

    /// Mask the configured API key in a URL before it is logged
    pub fn redact(&self, url: &str) -> String {
        match &self.api_key {
            Some(key) => url.replace(key.as_str(), "***"),
            None => url.to_string(),
        }
    }

    /// Fetch and apply indices for a city
    ///
    /// Each of the four indices is resolved on its own. A missing or
    /// non-numeric field becomes 0, and a failed request zeroes all four.
    pub async fn enrich(&self, city: &mut City) {
        let url = self.request_url(&city.name);
        self.enrich_from(&url, city).await;
    }

    /// Fetch indices from an explicit URL and apply them to `city`
    pub async fn enrich_from(&self, url: &str, city: &mut City) {
        let json = match self.fetch_indices(url).await {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Request failed for city {}: {}", city.name, e);
                Value::Null
            }
        };

        apply_indices(&json, city);
    }

    /// Fetch the raw indices document for a URL
    pub async fn fetch_indices(&self, url: &str) -> Result<Value, EnrichmentError> {
        tracing::debug!("Fetching indices from: {}", self.redact(url));

        // The URL may carry the API key, so keep it out of error messages
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            return Err(EnrichmentError::ApiError(format!(
                "Failed to fetch indices: {}",
                response.status()
            )));
        }

        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        serde_json::from_str(&body)
            .map_err(|e| EnrichmentError::InvalidResponse(format!("Failed to parse indices: {}", e)))
    }
}

/// Write the four fetched indices from a response document onto a city
pub fn apply_indices(json: &Value, city: &mut City) {
    city.crime_index = index_field(json, CRIME_FIELD);
    city.col_index = index_field(json, COST_OF_LIVING_FIELD);
    city.healthcare_index = index_field(json, HEALTHCARE_FIELD);
    city.pollution_index = index_field(json, POLLUTION_FIELD);
}

/// Read one numeric field, defaulting to 0
#[inline]
fn index_field(json: &Value, field: &str) -> f64 {
    json.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}
