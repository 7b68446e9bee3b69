//! Interest, location, and rating based host matching.
//!
//! The scoring and reason functions are pure; the engine layers the
//! directory and catalog collaborators on top and the router exposes the
//! result over HTTP.

pub mod directory;
pub mod domain;
pub mod engine;
pub mod reason;
pub mod router;
pub mod score;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryError, ListingCatalog, ProfileDirectory};
pub use domain::{
    HostId, HostListing, MatchRate, MatchedHost, MatchedHostView, OwnerSummary, UserId,
    UserProfile,
};
pub use engine::{MatchingEngine, MatchingError, DEFAULT_RANKING_LIMIT, MAX_RANKING_RESULTS};
pub use reason::match_reason;
pub use router::matching_router;
pub use score::{match_score, round_to_one_decimal};
