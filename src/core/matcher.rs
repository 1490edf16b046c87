use crate::core::{filters::is_eligible, scoring::compatibility_score};
use crate::models::{Profile, ScoredMatch, ScoringWeights};

/// Result of a find-matches run
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<ScoredMatch>,
    /// Size of the candidate set before eligibility filtering.
    pub total_candidates: usize,
}

/// Match Scorer orchestrator
///
/// # Pipeline
/// 1. Eligibility filter (different gender, different id)
/// 2. Per-candidate compatibility scoring
/// 3. Stable descending sort by score
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Score every eligible candidate against the subject and return them
    /// ranked by descending compatibility.
    ///
    /// Eligibility is checked here even when the caller already narrowed
    /// the candidate set. The sort is stable, so equal scores keep the
    /// candidate enumeration order. Every eligible candidate is returned:
    /// no truncation, no minimum score. An empty eligible set yields an
    /// empty result, not an error.
    ///
    /// Pure function of its inputs; never touches storage.
    pub fn find_matches(&self, subject: &Profile, candidates: Vec<Profile>) -> MatchOutcome {
        let total_candidates = candidates.len();

        let mut matches: Vec<ScoredMatch> = candidates
            .into_iter()
            .filter(|candidate| is_eligible(subject, candidate))
            .map(|candidate| {
                let score = compatibility_score(subject, &candidate, &self.weights);
                ScoredMatch {
                    user_id: candidate.id,
                    name: candidate.name,
                    age: candidate.age,
                    gender: candidate.gender,
                    city: candidate.city,
                    interests: candidate.interests,
                    compatibility_score: score,
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            b.compatibility_score
                .partial_cmp(&a.compatibility_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        MatchOutcome {
            matches,
            total_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, age: u8, gender: &str, city: &str, interests: &[&str]) -> Profile {
        Profile {
            id,
            name: format!("User {id}"),
            age,
            gender: gender.to_string(),
            email: format!("user{id}@example.com"),
            city: city.to_string(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn subject() -> Profile {
        candidate(1, 30, "male", "New York", &["reading", "travel", "music"])
    }

    #[test]
    fn test_filters_self_and_same_gender() {
        let matcher = Matcher::with_default_weights();
        let subject = subject();

        let candidates = vec![
            candidate(1, 30, "female", "New York", &[]), // same id as subject
            candidate(2, 28, "male", "New York", &[]),   // same gender
            candidate(3, 28, "female", "New York", &["travel"]),
        ];

        let outcome = matcher.find_matches(&subject, candidates);

        assert_eq!(outcome.total_candidates, 3);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].user_id, 3);
    }

    #[test]
    fn test_ranked_descending() {
        let matcher = Matcher::with_default_weights();
        let subject = subject();

        let candidates = vec![
            candidate(2, 31, "female", "Boston", &["sports"]),
            candidate(3, 28, "female", "New York", &["travel", "music", "cooking"]),
            candidate(4, 30, "female", "New York", &["reading", "travel", "music"]),
        ];

        let outcome = matcher.find_matches(&subject, candidates);

        assert_eq!(outcome.matches.len(), 3);
        for pair in outcome.matches.windows(2) {
            assert!(
                pair[0].compatibility_score >= pair[1].compatibility_score,
                "matches must be sorted non-increasing"
            );
        }
        // The identical profile is the best match, the stranger the worst.
        assert_eq!(outcome.matches[0].user_id, 4);
        assert_eq!(outcome.matches[2].user_id, 2);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let matcher = Matcher::with_default_weights();
        let subject = subject();

        // Identical scoring inputs in both candidates, distinct ids.
        let candidates = vec![
            candidate(5, 28, "female", "New York", &["travel"]),
            candidate(6, 28, "female", "New York", &["travel"]),
        ];

        let outcome = matcher.find_matches(&subject, candidates);

        assert_eq!(outcome.matches.len(), 2);
        assert_eq!(
            outcome.matches[0].compatibility_score,
            outcome.matches[1].compatibility_score
        );
        assert_eq!(outcome.matches[0].user_id, 5);
        assert_eq!(outcome.matches[1].user_id, 6);
    }

    #[test]
    fn test_returns_all_eligible_candidates() {
        let matcher = Matcher::with_default_weights();
        let subject = subject();

        let candidates: Vec<Profile> = (2..52)
            .map(|i| candidate(i, 20 + (i % 40) as u8, "female", "New York", &["travel"]))
            .collect();

        let outcome = matcher.find_matches(&subject, candidates);

        assert_eq!(outcome.matches.len(), 50, "no truncation or score floor");
    }

    #[test]
    fn test_empty_candidate_set() {
        let matcher = Matcher::with_default_weights();
        let outcome = matcher.find_matches(&subject(), vec![]);

        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.total_candidates, 0);
    }

    #[test]
    fn test_match_echoes_candidate_fields() {
        let matcher = Matcher::with_default_weights();
        let subject = subject();

        let candidates = vec![candidate(7, 28, "female", "Boston", &["music", "travel"])];
        let outcome = matcher.find_matches(&subject, candidates);

        let m = &outcome.matches[0];
        assert_eq!(m.user_id, 7);
        assert_eq!(m.name, "User 7");
        assert_eq!(m.age, 28);
        assert_eq!(m.gender, "female");
        assert_eq!(m.city, "Boston");
        assert_eq!(m.interests, vec!["music", "travel"]);
    }
}
