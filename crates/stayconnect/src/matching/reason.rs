//! Human-readable match explanations.
//!
//! Clauses must stay aligned with the positive signals in [`super::score`]:
//! both sides call the same `shared_interests` and `location_matches`
//! helpers so a score can never disagree with its explanation.

use super::score::{location_matches, shared_interests};

const FALLBACK_REASON: &str = "A chance to enjoy new encounters and experiences";

/// Build the explanation sentence for one guest/listing pair. Never empty.
pub fn match_reason(
    guest_interests: &[String],
    host_interests: &[String],
    location_preference: &str,
    host_location: &str,
) -> String {
    let mut clauses = Vec::new();

    let shared = shared_interests(guest_interests, host_interests);
    if !shared.is_empty() {
        clauses.push(format!("You share an interest in {}", shared.join(", ")));
    }

    if location_matches(location_preference, host_location) {
        clauses.push(format!("{host_location} matches your preferred area"));
    }

    if clauses.is_empty() {
        clauses.push(FALLBACK_REASON.to_string());
    }

    format!("{}.", clauses.join(". "))
}
