use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload for creating a profile. All fields except `interests` are
/// required; `interests` defaults to an empty list.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub age: u8,
    #[validate(length(min = 1, message = "gender must not be empty"))]
    pub gender: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Partial update payload. Absent fields leave the stored values
/// untouched; `interests`, when present, replaces the prior list
/// wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub age: Option<u8>,
    #[validate(length(min = 1, message = "gender must not be empty"))]
    pub gender: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: Option<String>,
    pub interests: Option<Vec<String>>,
}

/// Query string for the profile listing endpoint. Missing values fall
/// back to the configured pagination defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListProfilesQuery {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}
