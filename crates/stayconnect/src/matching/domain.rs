use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for platform users, guests and listing owners alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for host listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostId(pub u64);

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Directory view of a platform user as consumed by the matching engine.
///
/// The same shape serves both sides of a match: for a guest the `location`
/// field is the preferred area, for a listing owner the `interests` and
/// `rating` feed the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub interests: Vec<String>,
    pub location: String,
    pub rating: f64,
    pub review_count: u32,
}

/// A property listing published by a host owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostListing {
    pub id: HostId,
    pub owner: UserId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub property_type: String,
    pub max_guests: u8,
    pub price_per_night: u32,
    pub amenities: Vec<String>,
    pub house_rules: Vec<String>,
    pub photos: Vec<String>,
    pub available_dates: Vec<NaiveDate>,
    pub is_active: bool,
}

/// Owner identity embedded in match results for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: UserId,
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
}

impl OwnerSummary {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name.clone(),
            rating: profile.rating,
            review_count: profile.review_count,
        }
    }
}

/// One scored candidate produced by a ranking pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedHost {
    pub listing: HostListing,
    pub owner: OwnerSummary,
    pub score: f64,
    pub reason: String,
}

impl MatchedHost {
    /// Flattened wire representation for the presentation layer.
    pub fn view(&self) -> MatchedHostView {
        MatchedHostView {
            id: self.listing.id,
            title: self.listing.title.clone(),
            description: self.listing.description.clone(),
            location: self.listing.location.clone(),
            property_type: self.listing.property_type.clone(),
            max_guests: self.listing.max_guests,
            price_per_night: self.listing.price_per_night,
            photos: self.listing.photos.clone(),
            available_dates: self.listing.available_dates.clone(),
            owner: self.owner.clone(),
            match_score: self.score,
            match_reason: self.reason.clone(),
        }
    }
}

/// Response element pairing listing fields with the match outcome.
#[derive(Debug, Clone, Serialize)]
pub struct MatchedHostView {
    pub id: HostId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub property_type: String,
    pub max_guests: u8,
    pub price_per_night: u32,
    pub photos: Vec<String>,
    pub available_dates: Vec<NaiveDate>,
    pub owner: OwnerSummary,
    pub match_score: f64,
    pub match_reason: String,
}

/// Single-listing score response for detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRate {
    pub host_id: HostId,
    pub match_score: f64,
    pub match_reason: String,
}
