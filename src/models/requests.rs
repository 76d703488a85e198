use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find the best-matching city for a completed survey
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindCityRequest {
    /// Answers ordered population, weather, crime, cost of living,
    /// healthcare, pollution
    #[validate(length(equal = 6))]
    pub responses: Vec<f64>,
}
