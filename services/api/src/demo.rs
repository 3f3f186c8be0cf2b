use crate::infra::{read_listing_json, ListingCatalog};
use chrono::{Local, NaiveDate};
use clap::Args;
use inclusive_housing::config::AppConfig;
use inclusive_housing::error::AppError;
use inclusive_housing::housing::budget::{budget_timeline, savings_potential};
use inclusive_housing::housing::compliance::{
    accessibility_violations, discrimination_risks, mitigation_strategies, render_report,
};
use inclusive_housing::housing::{
    analyze_budget, assess_compliance, compare_listings, score_listings, BudgetAnalysis,
    Listing, ScoredListing, UserPreferences,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CatalogArgs {
    /// Listing CSV export. Falls back to HOUSING_LISTINGS_CSV, then the sample catalog.
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Monthly budget. Defaults to HOUSING_DEFAULT_BUDGET.
    #[arg(long)]
    pub(crate) budget: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct ListingArgs {
    /// Score a single listing stored as JSON instead of one from the catalog.
    #[arg(long, conflicts_with = "id")]
    pub(crate) listing_json: Option<PathBuf>,
    /// Catalog listing id (defaults to the first listing).
    #[arg(long)]
    pub(crate) id: Option<String>,
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    /// Number of listings to print.
    #[arg(long, default_value_t = 10)]
    pub(crate) top: usize,
    /// Also print the cost comparison table.
    #[arg(long)]
    pub(crate) compare: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BudgetArgs {
    #[command(flatten)]
    pub(crate) listing: ListingArgs,
    /// Savings target used for the months-to-goal estimate.
    #[arg(long)]
    pub(crate) savings_goal: Option<f64>,
    /// Months of recurring spend to project (at most ten years).
    #[arg(long, default_value_t = 12)]
    pub(crate) months: u32,
}

#[derive(Args, Debug)]
pub(crate) struct ComplianceArgs {
    #[command(flatten)]
    pub(crate) listing: ListingArgs,
    /// Assessment date printed on the report (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) assessed_on: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    #[command(flatten)]
    pub(crate) catalog: CatalogArgs,
    /// Assessment date for the compliance portion (YYYY-MM-DD).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

struct Workspace {
    catalog: ListingCatalog,
    preferences: UserPreferences,
}

fn open_workspace(args: CatalogArgs) -> Result<Workspace, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(csv) = args.csv {
        config.data.listings_csv = Some(csv);
    }

    let catalog = ListingCatalog::load(&config.data)?;
    let preferences = match args.budget {
        Some(budget) => UserPreferences::with_budget(budget),
        None => catalog.default_preferences(),
    };

    Ok(Workspace {
        catalog,
        preferences,
    })
}

fn select_listing(args: ListingArgs) -> Result<(Listing, UserPreferences), AppError> {
    let ListingArgs {
        listing_json,
        id,
        catalog,
    } = args;
    let workspace = open_workspace(catalog)?;

    let listing = match (listing_json, id) {
        (Some(path), _) => read_listing_json(&path)?,
        (None, Some(id)) => workspace
            .catalog
            .listings
            .into_iter()
            .find(|listing| listing.id.0 == id)
            .ok_or_else(|| AppError::BadRequest(format!("listing '{id}' not found in catalog")))?,
        (None, None) => workspace
            .catalog
            .listings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::BadRequest("listing catalog is empty".to_string()))?,
    };

    Ok((listing, workspace.preferences))
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        catalog,
        top,
        compare,
    } = args;
    let workspace = open_workspace(catalog)?;

    let ranked = score_listings(&workspace.catalog.listings, &workspace.preferences)?;
    render_ranking(&ranked, workspace.preferences.budget, top);

    if compare {
        let comparisons = compare_listings(&workspace.catalog.listings, &workspace.preferences)?;
        println!("\nCost comparison (best value first)");
        for comparison in comparisons.iter().take(top) {
            println!(
                "- {} | ${:.2}/month | {:.1}% of budget | value {:.1}",
                comparison.title,
                comparison.total_cost,
                comparison.affordability_ratio * 100.0,
                comparison.value_score
            );
        }
    }

    Ok(())
}

pub(crate) fn run_budget(args: BudgetArgs) -> Result<(), AppError> {
    let BudgetArgs {
        listing,
        savings_goal,
        months,
    } = args;
    let (listing, preferences) = select_listing(listing)?;

    let analysis = analyze_budget(&listing, &preferences)?;
    render_budget(&listing, &analysis, preferences.budget);

    if let Some(goal) = savings_goal {
        let savings = savings_potential(&listing, preferences.budget, goal)?;
        println!("\nSavings toward ${goal:.2}");
        println!("- Monthly savings: ${:.2}", savings.monthly_savings);
        match savings.months_to_goal {
            Some(months) if savings.achievable => println!("- Goal reached in {months:.1} months"),
            _ => println!("- Goal not reachable at this rent"),
        }
    }

    let timeline = budget_timeline(&listing, months);
    if !timeline.is_empty() {
        println!("\nRecurring spend ({} months)", timeline.len());
        for month in timeline {
            println!(
                "  Month {:>2}: ${:.2} (cumulative ${:.2})",
                month.month, month.total, month.cumulative
            );
        }
    }

    Ok(())
}

pub(crate) fn run_compliance(args: ComplianceArgs) -> Result<(), AppError> {
    let ComplianceArgs {
        listing,
        assessed_on,
    } = args;
    let (listing, _) = select_listing(listing)?;
    let assessed_on = assessed_on.unwrap_or_else(|| Local::now().date_naive());

    let check = assess_compliance(&listing);
    print!("{}", render_report(&listing, &check, assessed_on));

    let violations = accessibility_violations(&listing);
    if !violations.is_empty() {
        println!("\nAccessibility violations");
        for violation in violations {
            println!("- {violation}");
        }
    }

    let risks = discrimination_risks(&listing);
    if !risks.is_empty() {
        println!("\nDiscrimination risks");
        for risk in risks {
            println!("- {risk}");
        }
    }

    let strategies = mitigation_strategies(&check);
    if !strategies.is_empty() {
        println!("\nMitigation strategies");
        for strategy in strategies {
            println!("- {strategy}");
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { catalog, today } = args;
    let workspace = open_workspace(catalog)?;
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    println!("Inclusive housing demo");
    println!(
        "Catalog: {} listings | budget ${:.2}/month",
        workspace.catalog.listings.len(),
        workspace.preferences.budget
    );

    let ranked = score_listings(&workspace.catalog.listings, &workspace.preferences)?;
    render_ranking(&ranked, workspace.preferences.budget, 5);

    let Some(best) = ranked.first() else {
        println!("\nNo listings to analyze");
        return Ok(());
    };

    println!("\nTop pick: {}", best.listing.title);
    println!("Score breakdown: {}", best.di_score.breakdown);
    println!("Why it scored this way:");
    let rationale = &best.di_score.rationale;
    for line in [
        &rationale.affordability,
        &rationale.accessibility,
        &rationale.safety,
        &rationale.commute,
        &rationale.inclusivity,
    ] {
        println!("- {line}");
    }

    let analysis = analyze_budget(&best.listing, &workspace.preferences)?;
    println!();
    render_budget(&best.listing, &analysis, workspace.preferences.budget);

    let check = assess_compliance(&best.listing);
    println!();
    print!("{}", render_report(&best.listing, &check, today));

    Ok(())
}

fn render_ranking(ranked: &[ScoredListing], budget: f64, top: usize) {
    println!("\nRanked listings (budget ${budget:.2})");
    if ranked.is_empty() {
        println!("- none");
        return;
    }
    for (position, entry) in ranked.iter().take(top).enumerate() {
        println!(
            "{:>2}. {} [{}] {:.1} ({}) | ${:.0} rent",
            position + 1,
            entry.listing.title,
            entry.listing.id,
            entry.di_score.overall,
            entry.di_score.tier.label(),
            entry.listing.rent
        );
    }
}

fn render_budget(listing: &Listing, analysis: &BudgetAnalysis, budget: f64) {
    println!("Budget analysis: {}", listing.title);
    println!(
        "- Total monthly cost ${:.2} of ${:.2} budget ({:.1}%)",
        analysis.total_monthly_cost,
        budget,
        analysis.affordability_ratio * 100.0
    );
    println!(
        "- Affordability gauge: {} ({}% headroom)",
        analysis.affordability_gauge.message, analysis.affordability_gauge.percentage
    );
    println!(
        "- Move-in: ${:.2} first month | ${:.2} last month | ${:.2} deposit",
        analysis.deposit_schedule.first_month,
        analysis.deposit_schedule.last_month,
        analysis.deposit_schedule.security_deposit
    );

    println!("What-if scenarios");
    for scenario in &analysis.what_if_scenarios {
        println!(
            "  - {}: {} (${:.2})",
            scenario.scenario, scenario.impact, scenario.new_cost
        );
    }

    println!("Recommendations");
    for recommendation in &analysis.recommendations {
        println!("  - {recommendation}");
    }
}
