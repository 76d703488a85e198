// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{question, City, MatchResult, Shortlist, WeightMatrix};
pub use requests::FindCityRequest;
pub use responses::{ErrorResponse, FindCityResponse, HealthResponse};
