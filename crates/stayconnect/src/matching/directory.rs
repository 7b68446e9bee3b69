use super::domain::{HostId, HostListing, UserId, UserProfile};

/// User directory abstraction so the engine can run against fake stores.
pub trait ProfileDirectory: Send + Sync {
    fn user_profile(&self, id: UserId) -> Result<Option<UserProfile>, DirectoryError>;
}

/// Listing store abstraction. `active_listings` is expected to pre-filter on
/// the active flag; `listing` returns a listing regardless of that flag.
pub trait ListingCatalog: Send + Sync {
    fn active_listings(&self) -> Result<Vec<HostListing>, DirectoryError>;
    fn listing(&self, id: HostId) -> Result<Option<HostListing>, DirectoryError>;
}

/// Error enumeration for directory and catalog failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}
