use crate::models::{question, City, WeightMatrix};

/// Calculate each city's weighted contribution for every non-population answer
///
/// Row `i` holds, in survey order, `responses[q] * index_q` for the weather,
/// crime, cost of living, healthcare and pollution questions of city `i`.
/// The population answer is skipped because narrowing already consumed it.
/// Short surveys produce short rows; answers past the pollution question are
/// ignored.
pub fn calculate_weights(responses: &[f64], cities: &[City]) -> WeightMatrix {
    cities
        .iter()
        .map(|city| {
            responses
                .iter()
                .enumerate()
                .skip(question::POPULATION + 1)
                .take(question::COUNT - 1)
                .filter_map(|(position, weight)| city.index_for(position).map(|index| weight * index))
                .collect::<Vec<f64>>()
        })
        .collect()
}

/// Sum every row of the weight matrix into a single score
#[inline]
pub fn total_scores(weights: &WeightMatrix) -> Vec<f64> {
    weights.iter().map(|row| row.iter().sum::<f64>()).collect()
}

/// Pick the index of the highest-scoring city
///
/// The best score starts at 0 with index 0, and only a strictly greater
/// score replaces it. Ties therefore go to the earlier city, and when no
/// score is positive index 0 wins.
pub fn find_best_match_index(weights: &WeightMatrix) -> usize {
    let (best_index, _) = total_scores(weights)
        .into_iter()
        .enumerate()
        .fold((0, 0.0), |(best_index, best_score), (index, score)| {
            if score > best_score {
                (index, score)
            } else {
                (best_index, best_score)
            }
        });

    best_index
}
