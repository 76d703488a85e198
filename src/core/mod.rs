// Core algorithm exports
pub mod dataset;
pub mod engine;
pub mod narrowing;
pub mod ranking;

pub use dataset::{load_cities, parse_cities, query_escape, DatasetError};
pub use engine::Engine;
pub use narrowing::{narrow_by_population, tolerance_after};
pub use ranking::{calculate_weights, find_best_match_index, total_scores};
