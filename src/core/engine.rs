use crate::config::EnrichmentSettings;
use crate::core::{
    narrowing::narrow_by_population,
    ranking::{calculate_weights, find_best_match_index, total_scores},
};
use crate::models::{question, City, MatchResult};
use crate::services::{EnrichmentError, IndexClient};
use futures_util::stream::{self, StreamExt};
use std::time::Duration;

/// Default number of index requests in flight at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Population narrowing
/// 2. Index enrichment of every shortlisted city
/// 3. Weighting and ranking
///
/// The engine keeps no per-run state, so one instance can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct Engine {
    client: IndexClient,
    max_concurrency: usize,
}

impl Engine {
    pub fn new(client: IndexClient, max_concurrency: usize) -> Self {
        Self {
            client,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Build an engine from the enrichment section of the settings
    pub fn from_settings(settings: &EnrichmentSettings) -> Result<Self, EnrichmentError> {
        let client = IndexClient::new(
            settings.base_url.clone(),
            settings.api_key.clone(),
            Duration::from_secs(settings.timeout_secs),
        )?;

        Ok(Self::new(client, settings.max_concurrency))
    }

    /// Find the city that best fits a survey
    ///
    /// Returns a fixed fallback city when either input is empty. Never fails:
    /// enrichment errors only zero the affected indices.
    pub async fn find_ideal_city(&self, responses: &[f64], cities: &[City]) -> City {
        self.run(responses, cities).await.city
    }

    /// Run the full pipeline and report the winning score alongside the city
    pub async fn run(&self, responses: &[f64], cities: &[City]) -> MatchResult {
        if responses.is_empty() || cities.is_empty() {
            tracing::info!(
                "Nothing to match ({} responses, {} cities), using fallback city",
                responses.len(),
                cities.len()
            );
            return MatchResult::fallback();
        }

        let mut shortlist = narrow_by_population(responses[question::POPULATION], cities);

        if shortlist.is_empty() {
            tracing::warn!("No city has a population to compare against, returning first city");
            return MatchResult {
                city: cities[0].clone(),
                score: 0.0,
                shortlist_size: 0,
                fallback: false,
            };
        }

        self.enrich_all(&mut shortlist.cities).await;

        let weights = calculate_weights(responses, &shortlist.cities);
        let best_index = find_best_match_index(&weights);
        let score = total_scores(&weights).get(best_index).copied().unwrap_or(0.0);

        let shortlist_size = shortlist.len();
        let city = shortlist.cities.swap_remove(best_index);

        tracing::info!(
            "Best match: {}, {} (score {:.2}, from {} shortlisted of {} cities)",
            city.name,
            city.country,
            score,
            shortlist_size,
            cities.len()
        );

        MatchResult {
            city,
            score,
            shortlist_size,
            fallback: false,
        }
    }

    /// Enrich every city, with at most `max_concurrency` requests in flight
    async fn enrich_all(&self, cities: &mut [City]) {
        stream::iter(cities.iter_mut())
            .for_each_concurrent(self.max_concurrency, |city| self.client.enrich(city))
            .await;
    }
}
