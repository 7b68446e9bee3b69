//! Weighted match scoring between a guest profile and a host listing.

pub(crate) const INTEREST_WEIGHT: f64 = 0.60;
pub(crate) const LOCATION_WEIGHT: f64 = 0.25;
pub(crate) const RATING_WEIGHT: f64 = 0.15;

const RATING_SCALE: f64 = 5.0;

/// Compute the 0..=100 match score for one guest/listing pair.
///
/// The interest share is measured against the guest's declared interest
/// count, so a guest with a short list saturates that component with little
/// overlap while a guest with many interests needs proportionally more.
/// Empty inputs and a zero rating contribute nothing rather than erroring.
pub fn match_score(
    guest_interests: &[String],
    host_interests: &[String],
    location_preference: &str,
    host_location: &str,
    host_rating: f64,
) -> f64 {
    let mut score = 0.0;

    if !guest_interests.is_empty() {
        let shared = shared_interests(guest_interests, host_interests);
        score += shared.len() as f64 / guest_interests.len() as f64 * INTEREST_WEIGHT;
    }

    if location_matches(location_preference, host_location) {
        score += LOCATION_WEIGHT;
    }

    if host_rating > 0.0 {
        score += host_rating / RATING_SCALE * RATING_WEIGHT;
    }

    (score * 100.0).min(100.0)
}

/// Distinct interests the host shares with the guest, in the guest's
/// declared order.
pub(crate) fn shared_interests(
    guest_interests: &[String],
    host_interests: &[String],
) -> Vec<String> {
    let mut shared = Vec::new();
    for interest in guest_interests {
        if host_interests.contains(interest) && !shared.contains(interest) {
            shared.push(interest.clone());
        }
    }
    shared
}

/// Case-insensitive substring test; an empty preference never matches.
pub(crate) fn location_matches(preference: &str, host_location: &str) -> bool {
    !preference.is_empty() && host_location.to_lowercase().contains(&preference.to_lowercase())
}

/// Round to one decimal place, the precision scores are ranked and served at.
pub fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
