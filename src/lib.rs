//! Amora Match - Profile store and compatibility matching service for the Amora dating app
//!
//! This library provides profile CRUD on SQLite plus the weighted
//! compatibility scorer behind the matches endpoint: shared interests,
//! age proximity, and city, blended into a 0-100 score.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compatibility_score, MatchOutcome, Matcher};
pub use error::ApiError;
pub use models::{CreateProfileRequest, Profile, ScoredMatch, ScoringWeights, UpdateProfileRequest};
pub use services::{ProfileStore, StoreError};
