use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use stayconnect::matching::{
    DirectoryError, HostId, HostListing, ListingCatalog, ProfileDirectory, UserId, UserProfile,
};
use stayconnect::seed::SeedBatch;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Handles to the in-memory stores shared by the matching engine and the
/// browse endpoints.
#[derive(Clone)]
pub(crate) struct CatalogState {
    pub(crate) directory: Arc<InMemoryProfileDirectory>,
    pub(crate) catalog: Arc<InMemoryListingCatalog>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileDirectory {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileDirectory {
    pub(crate) fn insert(&self, profile: UserProfile) {
        let mut guard = self.profiles.lock().expect("directory mutex poisoned");
        guard.insert(profile.id, profile);
    }
}

impl ProfileDirectory for InMemoryProfileDirectory {
    fn user_profile(&self, id: UserId) -> Result<Option<UserProfile>, DirectoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.get(&id).cloned())
    }
}

/// Vec storage keeps publication order, which is the order tied ranking
/// scores fall back to.
#[derive(Default, Clone)]
pub(crate) struct InMemoryListingCatalog {
    listings: Arc<Mutex<Vec<HostListing>>>,
}

impl InMemoryListingCatalog {
    pub(crate) fn push(&self, listing: HostListing) {
        let mut guard = self.listings.lock().expect("catalog mutex poisoned");
        guard.push(listing);
    }
}

impl ListingCatalog for InMemoryListingCatalog {
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

pub(crate) fn apply_seed(
    batch: SeedBatch,
    directory: &InMemoryProfileDirectory,
    catalog: &InMemoryListingCatalog,
) {
    for user in batch.users {
        directory.insert(user);
    }
    for listing in batch.listings {
        catalog.push(listing);
    }
}

/// Bundled Tokyo catalog used when no seed export is supplied. Owners
/// 101-108 publish one listing each in their own area; users 1 and 2 are
/// guests.
pub(crate) fn sample_batch() -> SeedBatch {
    let owners = vec![
        profile(101, "Aiko Tanaka", &["cooking", "photography", "travel"], "Shibuya, Tokyo", 4.8, 52),
        profile(102, "Kenji Sato", &["music", "art", "coffee"], "Shimokitazawa, Tokyo", 4.5, 38),
        profile(103, "Yuki Kobayashi", &["technology", "gaming", "anime"], "Akihabara, Tokyo", 4.2, 21),
        profile(104, "Haruto Suzuki", &["hiking", "photography", "travel"], "Asakusa, Tokyo", 4.9, 64),
        profile(105, "Mei Watanabe", &["cooking", "reading", "movies"], "Kichijoji, Tokyo", 4.6, 47),
        profile(106, "Sora Ito", &["anime", "gaming", "music"], "Ikebukuro, Tokyo", 3.9, 12),
        profile(107, "Rin Yamamoto", &["travel", "coffee", "art"], "Nakameguro, Tokyo", 4.4, 29),
        profile(108, "Daichi Nakamura", &["cooking", "travel", "music"], "Ginza, Tokyo", 4.7, 55),
    ];

    let mut listings = vec![
        listing(
            11,
            &owners[0],
            "Shibuya Modern Apartment",
            "Bright two-room flat a short walk from Shibuya station.",
            "apartment",
            2,
            8000,
        ),
        listing(
            12,
            &owners[1],
            "Shimokitazawa Artist Loft",
            "Loft atelier above a Shimokitazawa record shop.",
            "loft",
            3,
            9500,
        ),
        listing(
            13,
            &owners[2],
            "Akihabara Tech Share House",
            "Shared tech house near the Akihabara electronics quarter.",
            "house",
            1,
            6000,
        ),
        listing(
            14,
            &owners[3],
            "Asakusa Traditional Townhouse",
            "Restored townhouse with tatami rooms by Senso-ji.",
            "townhouse",
            4,
            12000,
        ),
        listing(
            15,
            &owners[4],
            "Kichijoji Garden House",
            "Quiet family house facing Inokashira park.",
            "house",
            6,
            15000,
        ),
        listing(
            16,
            &owners[5],
            "Ikebukuro Anime Room",
            "Compact studio steps from Ikebukuro's anime arcades.",
            "studio",
            2,
            7000,
        ),
        listing(
            17,
            &owners[6],
            "Nakameguro Cafe Loft",
            "Cafe-style loft along the Nakameguro canal.",
            "loft",
            2,
            9000,
        ),
    ];

    let mut ginza = listing(
        18,
        &owners[7],
        "Ginza Luxury Apartment",
        "High-floor apartment over the Ginza shopping streets.",
        "apartment",
        6,
        20000,
    );
    ginza.is_active = false;
    listings.push(ginza);

    let mut users = vec![
        profile(1, "Emma Wilson", &["cooking", "photography", "travel"], "Shibuya", 0.0, 0),
        profile(2, "Liam Chen", &["technology", "gaming", "anime"], "Akihabara", 0.0, 0),
    ];
    users.extend(owners);

    SeedBatch { users, listings }
}

fn profile(
    id: u64,
    name: &str,
    interests: &[&str],
    location: &str,
    rating: f64,
    review_count: u32,
) -> UserProfile {
    UserProfile {
        id: UserId(id),
        name: name.to_string(),
        interests: interests.iter().map(|value| value.to_string()).collect(),
        location: location.to_string(),
        rating,
        review_count,
    }
}

fn listing(
    id: u64,
    owner: &UserProfile,
    title: &str,
    description: &str,
    property_type: &str,
    max_guests: u8,
    price_per_night: u32,
) -> HostListing {
    HostListing {
        id: HostId(id),
        owner: owner.id,
        title: title.to_string(),
        description: description.to_string(),
        location: owner.location.clone(),
        property_type: property_type.to_string(),
        max_guests,
        price_per_night,
        amenities: vec!["wifi".to_string(), "kitchen".to_string()],
        house_rules: vec!["no smoking".to_string()],
        photos: vec![format!("/photos/{id}.jpg")],
        available_dates: sample_dates(),
        is_active: true,
    }
}

fn sample_dates() -> Vec<NaiveDate> {
    [5, 12, 19]
        .into_iter()
        .filter_map(|day| NaiveDate::from_ymd_opt(2026, 9, day))
        .collect()
}
