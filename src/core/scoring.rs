use crate::models::{clamp_dimension, Pace, Profile};

/// Numeric stand-in for a pace category
#[inline]
pub fn pace_value(pace: Pace) -> f64 {
    match pace {
        Pace::Slow => 30.0,
        Pace::Moderate => 50.0,
        Pace::Fast => 80.0,
        Pace::Variable => 50.0,
    }
}

/// Calculate a match score (0-100) between a user profile and a reference profile
///
/// Scoring formula:
/// score = mean(
///     100 - |user.d - target.d|          for each of the 6 numeric dimensions,
///     100 - 2 * |pace(user) - pace(target)|
/// )
///
/// Pace mismatches count double. The result is 100 only when all 7 terms agree.
pub fn calculate_match_score(user: &Profile, target: &Profile) -> f64 {
    let numeric: f64 = user
        .dimensions()
        .iter()
        .zip(target.dimensions().iter())
        .map(|(u, t)| dimension_similarity(*u, *t))
        .sum();

    let pace = pace_similarity(user.pace, target.pace);

    clamp_dimension((numeric + pace) / 7.0)
}

#[inline]
fn dimension_similarity(user: f64, target: f64) -> f64 {
    100.0 - (user - target).abs()
}

#[inline]
fn pace_similarity(user: Pace, target: Pace) -> f64 {
    let diff = (pace_value(user) - pace_value(target)).abs();
    100.0 - 2.0 * diff
}
