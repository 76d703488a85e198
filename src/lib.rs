//! Homefinder - survey-driven city recommendation service
//!
//! This library provides the core matching algorithm: narrow a city dataset
//! by population, enrich the shortlist with quality indices fetched from a
//! city statistics API, and pick the city whose weighted score is highest.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Engine, load_cities, narrow_by_population, calculate_weights, find_best_match_index};
pub use models::{City, MatchResult, Shortlist, WeightMatrix, FindCityRequest, FindCityResponse};
pub use services::{IndexClient, EnrichmentError};
