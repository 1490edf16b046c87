// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use filters::is_eligible;
pub use matcher::{MatchOutcome, Matcher};
pub use scoring::{
    age_gap_score, city_match_score, compatibility_score, interest_overlap_score, AGE_GAP_DIVISOR,
};
