use crate::infra::{apply_seed, sample_batch, InMemoryListingCatalog, InMemoryProfileDirectory};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use stayconnect::error::AppError;
use stayconnect::matching::{
    ListingCatalog, MatchedHost, MatchingEngine, UserId, DEFAULT_RANKING_LIMIT,
};
use stayconnect::seed::{SeedBatch, SeedImporter};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Guest profile to rank hosts for
    #[arg(long)]
    pub(crate) guest_id: u64,
    /// Maximum number of results to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Seed the catalog from a CSV export instead of the bundled sample data
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Guest profile the demo ranks for (defaults to the first sample guest)
    #[arg(long)]
    pub(crate) guest_id: Option<u64>,
    /// Seed the catalog from a CSV export instead of the bundled sample data
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        guest_id,
        limit,
        seed_csv,
    } = args;

    let batch = load_batch(seed_csv)?;
    let (engine, _catalog) = seeded_engine(batch);
    let ranked =
        engine.rank_hosts_for_guest(UserId(guest_id), limit.unwrap_or(DEFAULT_RANKING_LIMIT))?;

    println!("Top matches for guest {guest_id}");
    render_ranking(&ranked);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { guest_id, seed_csv } = args;

    let guest_id = guest_id.unwrap_or(1);
    let batch = load_batch(seed_csv)?;

    println!("StayConnect matching demo");
    println!(
        "Catalog: {} profiles, {} listings",
        batch.users.len(),
        batch.listings.len()
    );

    let (engine, catalog) = seeded_engine(batch);

    println!("\nTop matches for guest {guest_id}");
    let ranked = engine.rank_hosts_for_guest(UserId(guest_id), DEFAULT_RANKING_LIMIT)?;
    render_ranking(&ranked);

    if let Some(best) = ranked.first() {
        let rate = engine.score_single_host(UserId(guest_id), best.listing.id)?;
        println!("\nSingle listing check: {}", best.listing.title);
        println!("- score {:.1} | {}", rate.match_score, rate.match_reason);
    }

    println!("\nBrowse snapshot (first 5 active listings)");
    for listing in catalog.active_listings()?.iter().take(5) {
        println!(
            "- {} | {} | {} guests | {} per night",
            listing.title, listing.location, listing.max_guests, listing.price_per_night
        );
    }

    Ok(())
}

fn load_batch(seed_csv: Option<PathBuf>) -> Result<SeedBatch, AppError> {
    match seed_csv {
        Some(path) => SeedImporter::from_path(path).map_err(AppError::from),
        None => Ok(sample_batch()),
    }
}

fn seeded_engine(
    batch: SeedBatch,
) -> (
    MatchingEngine<InMemoryProfileDirectory, InMemoryListingCatalog>,
    Arc<InMemoryListingCatalog>,
) {
    let directory = Arc::new(InMemoryProfileDirectory::default());
    let catalog = Arc::new(InMemoryListingCatalog::default());
    apply_seed(batch, &directory, &catalog);

    let engine = MatchingEngine::new(directory, catalog.clone());
    (engine, catalog)
}

fn render_ranking(ranked: &[MatchedHost]) {
    if ranked.is_empty() {
        println!("No active listings matched this guest");
        return;
    }

    for host in ranked {
        println!(
            "- [{:5.1}] {} | {} | {} guests | {} per night | owner {} ({:.1})",
            host.score,
            host.listing.title,
            host.listing.location,
            host.listing.max_guests,
            host.listing.price_per_night,
            host.owner.name,
            host.owner.rating
        );
        println!("        {}", host.reason);
    }
}
