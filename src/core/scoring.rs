use std::collections::HashSet;

use crate::models::{Profile, ScoringWeights};

/// Divisor normalizing the age gap; a 50-year gap zeroes the age term.
pub const AGE_GAP_DIVISOR: f64 = 50.0;

/// Calculate the compatibility score (nominally 0-100) between a subject
/// and one candidate.
///
/// Scoring formula:
/// score = (
///     interest_score * 0.5 +    # Jaccard overlap of the interest lists
///     age_score * 0.3 +         # 1 - |age gap| / 50
///     city_score * 0.2          # same city, case-insensitive
/// ) * 100, rounded to 2 decimal places
///
/// The age term goes negative once the gap exceeds 50 years and is not
/// clamped, so extreme gaps drag the total below zero.
pub fn compatibility_score(
    subject: &Profile,
    candidate: &Profile,
    weights: &ScoringWeights,
) -> f64 {
    let interest_score = interest_overlap_score(&subject.interests, &candidate.interests);
    let age_score = age_gap_score(subject.age, candidate.age);
    let city_score = city_match_score(&subject.city, &candidate.city);

    let total = (interest_score * weights.interests
        + age_score * weights.age
        + city_score * weights.city)
        * 100.0;

    round2(total)
}

/// Jaccard similarity of two interest lists (0-1)
///
/// The lists are treated as sets: duplicates collapse and order is
/// irrelevant. An empty union scores 0.
#[inline]
pub fn interest_overlap_score(subject: &[String], candidate: &[String]) -> f64 {
    let a: HashSet<&str> = subject.iter().map(String::as_str).collect();
    let b: HashSet<&str> = candidate.iter().map(String::as_str).collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    let common = a.intersection(&b).count();
    common as f64 / union as f64
}

/// Age proximity term: 1.0 at equal ages, decreasing linearly with the
/// gap, negative past 50 years.
#[inline]
pub fn age_gap_score(subject_age: u8, candidate_age: u8) -> f64 {
    1.0 - f64::from(subject_age.abs_diff(candidate_age)) / AGE_GAP_DIVISOR
}

/// City term: 1.0 when both cities match ignoring case, else 0.0.
#[inline]
pub fn city_match_score(subject_city: &str, candidate_city: &str) -> f64 {
    if subject_city.to_lowercase() == candidate_city.to_lowercase() {
        1.0
    } else {
        0.0
    }
}

/// Round to two decimal places, the precision exposed on the wire.
#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
