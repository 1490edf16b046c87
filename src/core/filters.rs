use crate::models::Profile;

/// Candidate eligibility for matching.
///
/// A candidate qualifies when its gender value differs from the
/// subject's (plain string inequality over the free-form field, so
/// differing case means differing gender) and it is not the subject
/// itself. No other filtering applies.
#[inline]
pub fn is_eligible(subject: &Profile, candidate: &Profile) -> bool {
    candidate.gender != subject.gender && candidate.id != subject.id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: i64, gender: &str) -> Profile {
        Profile {
            id,
            name: format!("User {id}"),
            age: 30,
            gender: gender.to_string(),
            email: format!("user{id}@example.com"),
            city: "Boston".to_string(),
            interests: vec![],
        }
    }

    #[test]
    fn test_opposite_gender_is_eligible() {
        let subject = profile(1, "male");
        let candidate = profile(2, "female");
        assert!(is_eligible(&subject, &candidate));
    }

    #[test]
    fn test_same_gender_is_ineligible() {
        let subject = profile(1, "male");
        let candidate = profile(2, "male");
        assert!(!is_eligible(&subject, &candidate));
    }

    #[test]
    fn test_self_is_ineligible() {
        let subject = profile(1, "male");
        let same_id = profile(1, "female");
        assert!(!is_eligible(&subject, &same_id));
    }

    #[test]
    fn test_gender_comparison_is_literal() {
        // The field is free-form text; "Male" and "male" are different
        // values and therefore count as different genders.
        let subject = profile(1, "male");
        let candidate = profile(2, "Male");
        assert!(is_eligible(&subject, &candidate));
    }
}
