use std::sync::Arc;

use tracing::{debug, warn};

use super::directory::{DirectoryError, ListingCatalog, ProfileDirectory};
use super::domain::{HostId, HostListing, MatchRate, MatchedHost, OwnerSummary, UserId, UserProfile};
use super::reason::match_reason;
use super::score::{match_score, round_to_one_decimal};

/// Hard ceiling on ranking results regardless of the caller-requested limit.
pub const MAX_RANKING_RESULTS: usize = 50;
/// Result count used when the caller does not request a limit.
pub const DEFAULT_RANKING_LIMIT: usize = 20;

/// Engine composing the directory and catalog collaborators with the
/// scoring rules. Holds no mutable state of its own; every ranking call
/// reads fresh from the collaborators.
pub struct MatchingEngine<D, C> {
    directory: Arc<D>,
    catalog: Arc<C>,
}

impl<D, C> MatchingEngine<D, C>
where
    D: ProfileDirectory + 'static,
    C: ListingCatalog + 'static,
{
    pub fn new(directory: Arc<D>, catalog: Arc<C>) -> Self {
        Self { directory, catalog }
    }

    /// Rank all active listings for a guest, best match first.
    ///
    /// Listings whose owner profile cannot be resolved are skipped instead
    /// of failing the whole ranking. Scores are rounded before sorting, so
    /// candidates whose rounded scores tie keep catalog order.
    pub fn rank_hosts_for_guest(
        &self,
        guest_id: UserId,
        limit: usize,
    ) -> Result<Vec<MatchedHost>, MatchingError> {
        let guest = self
            .directory
            .user_profile(guest_id)?
            .ok_or(MatchingError::GuestNotFound(guest_id))?;

        let mut matched = Vec::new();
        for listing in self.catalog.active_listings()? {
            let owner = match self.directory.user_profile(listing.owner)? {
                Some(owner) => owner,
                None => {
                    warn!(
                        listing = %listing.id,
                        owner = %listing.owner,
                        "skipping listing without an owner profile"
                    );
                    continue;
                }
            };
            matched.push(matched_host(&guest, listing, &owner));
        }

        matched.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matched.truncate(limit.min(MAX_RANKING_RESULTS));

        debug!(guest = %guest_id, results = matched.len(), "ranked active listings");
        Ok(matched)
    }

    /// Score exactly one listing for a guest, used by detail pages.
    ///
    /// Unlike ranking this does not require the listing to be active, and a
    /// missing owner profile is surfaced instead of skipped.
    pub fn score_single_host(
        &self,
        guest_id: UserId,
        host_id: HostId,
    ) -> Result<MatchRate, MatchingError> {
        let guest = self
            .directory
            .user_profile(guest_id)?
            .ok_or(MatchingError::GuestNotFound(guest_id))?;

        let listing = self
            .catalog
            .listing(host_id)?
            .ok_or(MatchingError::ListingNotFound(host_id))?;

        let owner = self
            .directory
            .user_profile(listing.owner)?
            .ok_or(MatchingError::OwnerNotFound {
                listing: host_id,
                owner: listing.owner,
            })?;

        let scored = matched_host(&guest, listing, &owner);
        Ok(MatchRate {
            host_id,
            match_score: scored.score,
            match_reason: scored.reason,
        })
    }
}

fn matched_host(guest: &UserProfile, listing: HostListing, owner: &UserProfile) -> MatchedHost {
    let score = match_score(
        &guest.interests,
        &owner.interests,
        &guest.location,
        &listing.location,
        owner.rating,
    );
    let reason = match_reason(
        &guest.interests,
        &owner.interests,
        &guest.location,
        &listing.location,
    );

    MatchedHost {
        owner: OwnerSummary::from_profile(owner),
        score: round_to_one_decimal(score),
        reason,
        listing,
    }
}

/// Error raised by the matching engine.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error("guest profile {0} not found")]
    GuestNotFound(UserId),
    #[error("host listing {0} not found")]
    ListingNotFound(HostId),
    #[error("listing {listing} references missing owner profile {owner}")]
    OwnerNotFound { listing: HostId, owner: UserId },
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
