use crate::models::{City, Shortlist};

/// Smallest shortlist the narrowing stage accepts
pub const MIN_SHORTLIST: usize = 10;

/// Largest shortlist the narrowing stage keeps
pub const MAX_SHORTLIST: usize = 25;

/// Relative tolerance used on the first pass
pub const INITIAL_TOLERANCE: f64 = 0.10;

/// Amount the tolerance grows by on each retry
pub const TOLERANCE_STEP: f64 = 0.02;

/// Targets below this are raised to it so the ratio stays meaningful
pub const MIN_TARGET_POPULATION: f64 = 100.0;

/// Largest retry count the widening search steps through
///
/// Past this point `tolerance_after` can no longer be stepped exactly in
/// `f64`, so the window is opened to every city instead.
pub const MAX_RETRIES: u64 = 1 << 50;

/// Tolerance in effect after `retries` widenings
#[inline]
pub fn tolerance_after(retries: u64) -> f64 {
    INITIAL_TOLERANCE + TOLERANCE_STEP * retries as f64
}

/// Check whether a city's population is within `tolerance` of the target
///
/// The comparison is on `target / population`, so a city with no population
/// never matches.
#[inline]
pub fn within_tolerance(target: f64, city: &City, tolerance: f64) -> bool {
    if city.population == 0 {
        return false;
    }

    let ratio = target / city.population as f64;
    ratio >= 1.0 - tolerance && ratio <= 1.0 + tolerance
}

/// Narrow the full city list to cities with a population close to `target`
///
/// The window starts at ±10% and widens by two points until at least
/// [`MIN_SHORTLIST`] cities match. Each pass keeps input order and drops
/// everything past [`MAX_SHORTLIST`]. If fewer than [`MIN_SHORTLIST`] cities
/// have a population at all, the pass that first collects every one of them
/// ends the search. A target so far from every city that the window would
/// need more than [`MAX_RETRIES`] widenings gets an unbounded window, which
/// admits every city with a population.
pub fn narrow_by_population(target: f64, cities: &[City]) -> Shortlist {
    let target = clamp_target(target);
    let eligible = cities.iter().filter(|city| city.population > 0).count();

    let mut retries = 0;
    let mut tolerance = tolerance_after(retries);
    loop {
        let mut narrowed: Vec<City> = cities
            .iter()
            .filter(|city| within_tolerance(target, city, tolerance))
            .cloned()
            .collect();
        let matched = narrowed.len();

        // Positional truncation: later entries are dropped regardless of how close they are
        narrowed.truncate(MAX_SHORTLIST);

        if narrowed.len() >= MIN_SHORTLIST || matched >= eligible {
            tracing::debug!(
                "Narrowed {} cities to {} around population {} (tolerance {:.2}, {} retries)",
                cities.len(),
                narrowed.len(),
                target,
                tolerance,
                retries
            );

            return Shortlist {
                cities: narrowed,
                tolerance,
                retries,
            };
        }

        match next_useful_retry(target, cities, tolerance, retries) {
            Some(next) => {
                retries = next;
                tolerance = tolerance_after(next);
            }
            None => {
                tracing::debug!(
                    "Population {} is beyond any reachable window, admitting every city",
                    target
                );
                retries = MAX_RETRIES;
                tolerance = f64::INFINITY;
            }
        }
    }
}

/// Smallest retry count past `retries` whose window admits a new city
///
/// Passes in between would collect exactly the same cities, so they are
/// skipped. This keeps far-off targets from spinning through millions of
/// identical passes. Returns `None` when the next useful count would be
/// past [`MAX_RETRIES`].
fn next_useful_retry(target: f64, cities: &[City], tolerance: f64, retries: u64) -> Option<u64> {
    let needed = cities
        .iter()
        .filter(|city| city.population > 0 && !within_tolerance(target, city, tolerance))
        .map(|city| (target / city.population as f64 - 1.0).abs())
        .fold(f64::INFINITY, f64::min);

    if !needed.is_finite() {
        return None;
    }

    let estimate = ((needed - INITIAL_TOLERANCE) / TOLERANCE_STEP).floor();
    if estimate >= MAX_RETRIES as f64 {
        return None;
    }

    let mut next = if estimate > retries as f64 {
        estimate as u64
    } else {
        retries + 1
    };

    let admits_new_city = |next: u64| {
        cities.iter().any(|city| {
            !within_tolerance(target, city, tolerance)
                && within_tolerance(target, city, tolerance_after(next))
        })
    };

    while !admits_new_city(next) {
        if next >= MAX_RETRIES {
            return None;
        }
        next += 1;
    }

    Some(next)
}

#[inline]
fn clamp_target(target: f64) -> f64 {
    if target.is_finite() && target >= MIN_TARGET_POPULATION {
        target
    } else {
        MIN_TARGET_POPULATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(name: &str, population: u64) -> City {
        City::new(name, "Testland", population)
    }

    fn spread_cities(count: usize, start: u64, step: u64) -> Vec<City> {
        (0..count)
            .map(|i| city(&format!("City {}", i), start + step * i as u64))
            .collect()
    }

    #[test]
    fn test_tolerance_schedule() {
        assert!((tolerance_after(0) - 0.10).abs() < 1e-12);
        assert!((tolerance_after(1) - 0.12).abs() < 1e-12);
        assert!((tolerance_after(5) - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_within_tolerance_bounds() {
        let c = city("Exact", 1_000_000);

        assert!(within_tolerance(1_000_000.0, &c, 0.10));
        assert!(within_tolerance(1_095_000.0, &c, 0.10));
        assert!(within_tolerance(905_000.0, &c, 0.10));
        assert!(!within_tolerance(1_200_000.0, &c, 0.10));
        assert!(!within_tolerance(1_000_000.0, &city("Empty", 0), 10.0));
    }

    #[test]
    fn test_first_pass_accepted_when_enough_match() {
        // All twelve are within 10% of one million
        let cities = spread_cities(12, 1_000_000, 5_000);

        let shortlist = narrow_by_population(1_000_000.0, &cities);

        assert_eq!(shortlist.len(), 12);
        assert_eq!(shortlist.retries, 0);
        assert!((shortlist.tolerance - INITIAL_TOLERANCE).abs() < 1e-12);
        assert_eq!(shortlist.cities[0].name, "City 0");
    }

    #[test]
    fn test_truncates_positionally_to_max() {
        let cities = spread_cities(40, 1_000_000, 1_000);

        let shortlist = narrow_by_population(1_000_000.0, &cities);

        assert_eq!(shortlist.len(), MAX_SHORTLIST);
        assert_eq!(shortlist.cities[0].name, "City 0");
        assert_eq!(shortlist.cities[24].name, "City 24");
    }

    #[test]
    fn test_widens_until_minimum_reached() {
        // Populations 1.0M, 1.1M, ... 3.9M: only a few fall inside ±10% of 1M
        let cities = spread_cities(30, 1_000_000, 100_000);

        let shortlist = narrow_by_population(1_000_000.0, &cities);

        assert!(shortlist.len() >= MIN_SHORTLIST);
        assert!(shortlist.len() <= MAX_SHORTLIST);
        assert!(shortlist.retries > 0);
        assert!((shortlist.tolerance - tolerance_after(shortlist.retries)).abs() < 1e-12);
    }

    #[test]
    fn test_small_target_clamped() {
        let cities = spread_cities(10, 95, 1);

        let from_zero = narrow_by_population(0.0, &cities);
        let from_negative = narrow_by_population(-50.0, &cities);
        let from_nan = narrow_by_population(f64::NAN, &cities);

        assert_eq!(from_zero.len(), 10);
        assert_eq!(from_negative.len(), 10);
        assert_eq!(from_nan.len(), 10);
    }

    #[test]
    fn test_terminates_with_fewer_than_minimum_cities() {
        let cities = vec![city("A", 50_000), city("B", 2_000_000), city("C", 0)];

        let shortlist = narrow_by_population(1_000_000.0, &cities);

        assert_eq!(shortlist.len(), 2);
    }

    #[test]
    fn test_distant_target_skips_identical_passes() {
        let cities: Vec<City> = (0..10).map(|i| city(&format!("Village {}", i), 10 + i)).collect();

        let shortlist = narrow_by_population(1.0e7, &cities);

        assert_eq!(shortlist.len(), 10);
        // Wide enough for the smallest village
        assert!(shortlist.tolerance >= 999_998.0);
        assert_eq!(shortlist.tolerance, tolerance_after(shortlist.retries));
    }

    #[test]
    fn test_huge_target_admits_every_city() {
        // 100k, 150k, ... 1.55M
        let cities = spread_cities(30, 100_000, 50_000);

        for target in [1.0e300, f64::MAX] {
            let shortlist = narrow_by_population(target, &cities);

            assert_eq!(shortlist.len(), MAX_SHORTLIST);
            assert_eq!(shortlist.cities[0].name, "City 0");
            assert_eq!(shortlist.retries, MAX_RETRIES);
            assert!(shortlist.tolerance.is_infinite());
        }
    }

    #[test]
    fn test_large_but_reachable_target_keeps_retry_schedule() {
        let cities = spread_cities(30, 100_000, 50_000);

        let shortlist = narrow_by_population(1.0e16, &cities);

        assert_eq!(shortlist.len(), MIN_SHORTLIST);
        assert!(shortlist.retries < MAX_RETRIES);
        assert_eq!(shortlist.tolerance, tolerance_after(shortlist.retries));
    }

    #[test]
    fn test_all_zero_population_yields_empty_shortlist() {
        let cities = vec![city("A", 0), city("B", 0)];
        assert!(narrow_by_population(1_000_000.0, &cities).is_empty());
    }
}
