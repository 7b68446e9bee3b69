use crate::demo::{run_demo, run_rank, DemoArgs, RankArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use stayconnect::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "StayConnect API",
    about = "Serve and explore the StayConnect host matching service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank hosts for a guest and print the scored results
    Rank(RankArgs),
    /// Run a guided matching demo against the bundled sample catalog
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the catalog from a CSV export instead of the bundled sample data
    #[arg(long)]
    pub(crate) seed_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Demo(args) => run_demo(args),
    }
}
