use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::matching::directory::{DirectoryError, ListingCatalog, ProfileDirectory};
use crate::matching::domain::{HostId, HostListing, UserId, UserProfile};
use crate::matching::engine::MatchingEngine;
use crate::matching::router::matching_router;

pub(super) fn guest(id: u64, interests: &[&str], location: &str) -> UserProfile {
    UserProfile {
        id: UserId(id),
        name: format!("Guest {id}"),
        interests: interests.iter().map(|value| value.to_string()).collect(),
        location: location.to_string(),
        rating: 0.0,
        review_count: 0,
    }
}

pub(super) fn owner(id: u64, interests: &[&str], rating: f64) -> UserProfile {
    UserProfile {
        id: UserId(id),
        name: format!("Owner {id}"),
        interests: interests.iter().map(|value| value.to_string()).collect(),
        location: String::new(),
        rating,
        review_count: 12,
    }
}

pub(super) fn listing(id: u64, owner: u64, location: &str) -> HostListing {
    HostListing {
        id: HostId(id),
        owner: UserId(owner),
        title: format!("Listing {id}"),
        description: "A welcoming stay".to_string(),
        location: location.to_string(),
        property_type: "apartment".to_string(),
        max_guests: 2,
        price_per_night: 9800,
        amenities: vec!["wifi".to_string()],
        house_rules: vec!["no smoking".to_string()],
        photos: vec![format!("/photos/{id}.jpg")],
        available_dates: vec![NaiveDate::from_ymd_opt(2026, 9, 1).expect("valid date")],
        is_active: true,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl MemoryDirectory {
    pub(super) fn insert(&self, profile: UserProfile) {
        let mut guard = self.profiles.lock().expect("directory mutex poisoned");
        guard.insert(profile.id, profile);
    }
}

impl ProfileDirectory for MemoryDirectory {
    fn user_profile(&self, id: UserId) -> Result<Option<UserProfile>, DirectoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCatalog {
    listings: Arc<Mutex<Vec<HostListing>>>,
}

impl MemoryCatalog {
    pub(super) fn push(&self, listing: HostListing) {
        let mut guard = self.listings.lock().expect("catalog mutex poisoned");
        guard.push(listing);
    }
}

impl ListingCatalog for MemoryCatalog {
    fn active_listings(&self) -> Result<Vec<HostListing>, DirectoryError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
        Ok(guard
            .iter()
            .filter(|listing| listing.is_active)
            .cloned()
            .collect())
    }

    fn listing(&self, id: HostId) -> Result<Option<HostListing>, DirectoryError> {
        let guard = self.listings.lock().expect("catalog mutex poisoned");
        Ok(guard.iter().find(|listing| listing.id == id).cloned())
    }
}

pub(super) struct UnavailableDirectory;

impl ProfileDirectory for UnavailableDirectory {
    fn user_profile(&self, _id: UserId) -> Result<Option<UserProfile>, DirectoryError> {
        Err(DirectoryError::Unavailable("directory offline".to_string()))
    }
}

pub(super) fn build_engine() -> (
    MatchingEngine<MemoryDirectory, MemoryCatalog>,
    Arc<MemoryDirectory>,
    Arc<MemoryCatalog>,
) {
    let directory = Arc::new(MemoryDirectory::default());
    let catalog = Arc::new(MemoryCatalog::default());
    let engine = MatchingEngine::new(directory.clone(), catalog.clone());
    (engine, directory, catalog)
}

pub(super) fn matching_router_with_engine(
    engine: MatchingEngine<MemoryDirectory, MemoryCatalog>,
) -> axum::Router {
    matching_router(Arc::new(engine))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
