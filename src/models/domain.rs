use serde::{Deserialize, Serialize};

/// A stored matchmaking profile.
///
/// `interests` is a plain list here and everywhere above the store; the
/// JSON-text column encoding is confined to the persistence adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub email: String,
    pub city: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// One ranked candidate in a find-matches result.
///
/// Echoes the candidate's public fields plus the computed score; the
/// email address is deliberately not included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub user_id: i64,
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub city: String,
    pub interests: Vec<String>,
    pub compatibility_score: f64,
}

/// Scoring weights for the compatibility formula.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub interests: f64,
    pub age: f64,
    pub city: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 0.5,
            age: 0.3,
            city: 0.2,
        }
    }
}
