use std::sync::Arc;

use super::common::{
    build_engine, guest, listing, owner, MemoryCatalog, UnavailableDirectory,
};
use crate::matching::domain::{HostId, UserId};
use crate::matching::engine::{MatchingEngine, MatchingError, MAX_RANKING_RESULTS};
use crate::matching::score::round_to_one_decimal;

#[test]
fn unknown_guest_is_a_terminal_error() {
    let (engine, _directory, _catalog) = build_engine();

    let result = engine.rank_hosts_for_guest(UserId(1), 20);

    assert!(matches!(result, Err(MatchingError::GuestNotFound(UserId(1)))));
}

#[test]
fn empty_catalog_ranks_to_an_empty_list() {
    let (engine, directory, _catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], "shibuya"));

    let ranked = engine.rank_hosts_for_guest(UserId(1), 20).expect("ranking");

    assert!(ranked.is_empty());
}

#[test]
fn inactive_listings_never_rank() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    directory.insert(owner(10, &["cooking"], 4.5));
    catalog.push(listing(7, 10, "Tokyo"));
    let mut retired = listing(8, 10, "Tokyo");
    retired.is_active = false;
    catalog.push(retired);

    let ranked = engine.rank_hosts_for_guest(UserId(1), 20).expect("ranking");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].listing.id, HostId(7));
}

#[test]
fn listings_without_owner_profiles_are_skipped() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    directory.insert(owner(10, &["cooking"], 4.5));
    directory.insert(owner(11, &["music"], 4.0));
    catalog.push(listing(7, 10, "Tokyo"));
    catalog.push(listing(8, 99, "Tokyo"));
    catalog.push(listing(9, 11, "Tokyo"));

    let ranked = engine.rank_hosts_for_guest(UserId(1), 20).expect("ranking");

    let ids: Vec<HostId> = ranked.iter().map(|host| host.listing.id).collect();
    assert_eq!(ids, vec![HostId(7), HostId(9)]);
}

#[test]
fn results_sort_by_score_descending() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking", "music", "art"], "shibuya"));
    directory.insert(owner(10, &["cooking", "music", "art"], 5.0));
    directory.insert(owner(11, &["cooking", "music"], 4.0));
    directory.insert(owner(12, &["cooking"], 0.0));
    directory.insert(owner(13, &["hiking"], 0.0));
    catalog.push(listing(7, 13, "Tokyo"));
    catalog.push(listing(8, 11, "Tokyo"));
    catalog.push(listing(9, 10, "Shibuya Tokyo"));
    catalog.push(listing(10, 12, "Tokyo"));

    let ranked = engine.rank_hosts_for_guest(UserId(1), 20).expect("ranking");

    let ids: Vec<HostId> = ranked.iter().map(|host| host.listing.id).collect();
    assert_eq!(ids, vec![HostId(9), HostId(8), HostId(10), HostId(7)]);
    for pair in ranked.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
    assert_eq!(ranked[0].score, 100.0);
}

#[test]
fn tied_scores_keep_catalog_order() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    directory.insert(owner(10, &["cooking"], 4.0));
    directory.insert(owner(11, &["cooking"], 4.0));
    catalog.push(listing(7, 10, "Tokyo"));
    catalog.push(listing(8, 11, "Tokyo"));

    let ranked = engine.rank_hosts_for_guest(UserId(1), 20).expect("ranking");

    assert_eq!(ranked[0].score, ranked[1].score);
    let ids: Vec<HostId> = ranked.iter().map(|host| host.listing.id).collect();
    assert_eq!(ids, vec![HostId(7), HostId(8)]);
}

#[test]
fn limit_truncates_the_ranking() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    directory.insert(owner(10, &["cooking"], 4.0));
    for id in 1..=5 {
        catalog.push(listing(id, 10, "Tokyo"));
    }

    let ranked = engine.rank_hosts_for_guest(UserId(1), 2).expect("ranking");

    assert_eq!(ranked.len(), 2);
}

#[test]
fn zero_limit_returns_no_results() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    directory.insert(owner(10, &["cooking"], 4.0));
    catalog.push(listing(7, 10, "Tokyo"));

    let ranked = engine.rank_hosts_for_guest(UserId(1), 0).expect("ranking");

    assert!(ranked.is_empty());
}

#[test]
fn oversized_limits_are_capped() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    directory.insert(owner(10, &["cooking"], 4.0));
    for id in 1..=55 {
        catalog.push(listing(id, 10, "Tokyo"));
    }

    let ranked = engine.rank_hosts_for_guest(UserId(1), 100).expect("ranking");

    assert_eq!(ranked.len(), MAX_RANKING_RESULTS);
}

#[test]
fn ranked_scores_are_already_rounded() {
    let (engine, directory, catalog) = build_engine();
    // Two of three interests shared exercises an inexact binary fraction.
    directory.insert(guest(1, &["cooking", "music", "art"], ""));
    directory.insert(owner(10, &["cooking", "music"], 0.0));
    catalog.push(listing(7, 10, "Tokyo"));

    let ranked = engine.rank_hosts_for_guest(UserId(1), 20).expect("ranking");

    assert_eq!(ranked[0].score, 40.0);
    assert_eq!(ranked[0].score, round_to_one_decimal(ranked[0].score));
}

#[test]
fn directory_failure_surfaces_as_an_error() {
    let engine = MatchingEngine::new(
        Arc::new(UnavailableDirectory),
        Arc::new(MemoryCatalog::default()),
    );

    let result = engine.rank_hosts_for_guest(UserId(1), 20);

    assert!(matches!(result, Err(MatchingError::Directory(_))));
}

#[test]
fn single_listing_score_matches_the_ranked_score() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking", "music"], "shibuya"));
    directory.insert(owner(10, &["cooking"], 4.5));
    catalog.push(listing(7, 10, "Shibuya Tokyo"));

    let ranked = engine.rank_hosts_for_guest(UserId(1), 20).expect("ranking");
    let rate = engine
        .score_single_host(UserId(1), HostId(7))
        .expect("single score");

    assert_eq!(rate.host_id, HostId(7));
    assert_eq!(rate.match_score, ranked[0].score);
    assert_eq!(rate.match_reason, ranked[0].reason);
}

#[test]
fn single_listing_scoring_ignores_the_active_flag() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    directory.insert(owner(10, &["cooking"], 0.0));
    let mut retired = listing(7, 10, "Tokyo");
    retired.is_active = false;
    catalog.push(retired);

    let rate = engine
        .score_single_host(UserId(1), HostId(7))
        .expect("single score");

    assert_eq!(rate.match_score, 60.0);
}

#[test]
fn unknown_listing_is_reported() {
    let (engine, directory, _catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));

    let result = engine.score_single_host(UserId(1), HostId(7));

    assert!(matches!(
        result,
        Err(MatchingError::ListingNotFound(HostId(7)))
    ));
}

#[test]
fn missing_owner_is_reported_for_single_scoring() {
    let (engine, directory, catalog) = build_engine();
    directory.insert(guest(1, &["cooking"], ""));
    catalog.push(listing(7, 99, "Tokyo"));

    let result = engine.score_single_host(UserId(1), HostId(7));

    assert!(matches!(
        result,
        Err(MatchingError::OwnerNotFound {
            listing: HostId(7),
            owner: UserId(99),
        })
    ));
}
