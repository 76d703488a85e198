use serde::{Deserialize, Serialize};

/// Positions of the survey answers inside a response vector.
///
/// The order is fixed by the survey and must never be reindexed.
pub mod question {
    pub const POPULATION: usize = 0;
    pub const WEATHER: usize = 1;
    pub const CRIME: usize = 2;
    pub const COST_OF_LIVING: usize = 3;
    pub const HEALTHCARE: usize = 4;
    pub const POLLUTION: usize = 5;

    /// Number of answers a complete survey carries
    pub const COUNT: usize = 6;
}

/// A candidate city with its quality indices
///
/// Indices default to 0, which means "unknown" rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
    pub population: u64,
    #[serde(rename = "climateIndex", default)]
    pub climate_index: f64,
    #[serde(rename = "crimeIndex", default)]
    pub crime_index: f64,
    #[serde(rename = "colIndex", default)]
    pub col_index: f64,
    #[serde(rename = "healthcareIndex", default)]
    pub healthcare_index: f64,
    #[serde(rename = "pollutionIndex", default)]
    pub pollution_index: f64,
}

impl City {
    /// Build a city with every quality index zeroed
    pub fn new(name: impl Into<String>, country: impl Into<String>, population: u64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            population,
            climate_index: 0.0,
            crime_index: 0.0,
            col_index: 0.0,
            healthcare_index: 0.0,
            pollution_index: 0.0,
        }
    }

    /// City returned when there is nothing to match against
    pub fn fallback() -> Self {
        Self::new("Chicago", "USA", 3_000_000)
    }

    /// Quality index paired with the survey question at `position`
    ///
    /// Returns `None` for the population question and for positions past
    /// the end of the survey.
    pub fn index_for(&self, position: usize) -> Option<f64> {
        match position {
            question::WEATHER => Some(self.climate_index),
            question::CRIME => Some(self.crime_index),
            question::COST_OF_LIVING => Some(self.col_index),
            question::HEALTHCARE => Some(self.healthcare_index),
            question::POLLUTION => Some(self.pollution_index),
            _ => None,
        }
    }
}

/// Per-city weighted contributions, one row per shortlisted city
pub type WeightMatrix = Vec<Vec<f64>>;

/// Cities kept by population narrowing for a single matching run
#[derive(Debug, Clone, Default)]
pub struct Shortlist {
    pub cities: Vec<City>,
    /// Relative tolerance the final pass accepted
    pub tolerance: f64,
    /// Number of times the window was widened
    pub retries: u64,
}

impl Shortlist {
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Outcome of one matching run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub city: City,
    pub score: f64,
    #[serde(rename = "shortlistSize")]
    pub shortlist_size: usize,
    /// True when the fixed fallback city was returned
    pub fallback: bool,
}

impl MatchResult {
    pub fn fallback() -> Self {
        Self {
            city: City::fallback(),
            score: 0.0,
            shortlist_size: 0,
            fallback: true,
        }
    }
}
