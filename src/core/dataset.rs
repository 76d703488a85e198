use crate::models::City;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading the bundled city dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One entry of the dataset as it appears on disk
#[derive(Debug, Deserialize)]
struct DatasetRecord {
    city_ascii: String,
    country: String,
    #[serde(default)]
    population: Option<f64>,
    #[serde(default)]
    climate_index: Option<f64>,
}

/// Load cities from a JSON dataset file
///
/// Any failure to read or parse the file yields an empty list; callers are
/// expected to handle the empty case through the engine's fallback.
pub fn load_cities<P: AsRef<Path>>(path: P) -> Vec<City> {
    let path = path.as_ref();

    match read_cities(path) {
        Ok(cities) => {
            tracing::info!("Loaded {} cities from {}", cities.len(), path.display());
            cities
        }
        Err(e) => {
            tracing::warn!("Failed to load dataset {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn read_cities(path: &Path) -> Result<Vec<City>, DatasetError> {
    let raw = std::fs::read_to_string(path)?;
    parse_cities(&raw)
}

/// Parse cities from the dataset's JSON text
///
/// The first record without a population ends ingestion; everything after it
/// is ignored.
pub fn parse_cities(json: &str) -> Result<Vec<City>, DatasetError> {
    let records: Vec<DatasetRecord> = serde_json::from_str(json)?;

    let cities = records
        .into_iter()
        .map_while(|record| {
            let population = record.population?;
            let mut city = City::new(record.city_ascii, record.country, to_population(population));
            city.climate_index = record.climate_index.unwrap_or(0.0);
            Some(city)
        })
        .collect();

    Ok(cities)
}

/// Convert a raw JSON population into a head count
#[inline]
fn to_population(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        raw as u64
    } else {
        0
    }
}

/// Make a city name usable in the index API's query string
///
/// Only spaces are escaped. Other reserved characters pass through untouched.
pub fn query_escape(name: &str) -> String {
    name.replace(' ', "%20")
}
