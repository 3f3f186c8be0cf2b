use crate::demo::{
    run_budget, run_compliance, run_demo, run_rank, BudgetArgs, ComplianceArgs, DemoArgs,
    RankArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use inclusive_housing::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Inclusive Housing Navigator",
    about = "Score, budget and compliance-check student housing listings",
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
    /// Rank the listing catalog by D&I score
    Rank(RankArgs),
    /// Print a budget plan for one listing
    Budget(BudgetArgs),
    /// Print a compliance assessment report for one listing
    Compliance(ComplianceArgs),
    /// Walk through ranking, budgeting and compliance for the top listing
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
    /// Listing CSV to serve from `GET /api/v1/listings`
    #[arg(long)]
    pub(crate) listings_csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Budget(args) => run_budget(args),
        Command::Compliance(args) => run_compliance(args),
        Command::Demo(args) => run_demo(args),
    }
}
