// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, ScoredMatch, ScoringWeights};
pub use requests::{CreateProfileRequest, ListProfilesQuery, UpdateProfileRequest};
pub use responses::{ErrorResponse, HealthResponse};
