use super::common::*;
use crate::housing::budget::{analyze_budget, compare_listings, recommendations, GaugeStatus};
use crate::housing::domain::PreconditionViolation;
use pretty_assertions::assert_eq;

#[test]
fn cheaper_listing_wins_comparison() {
    let listings = vec![sparse_listing("downtown", 2000.0), sparse_listing("suburb", 800.0)];

    let comparisons = compare_listings(&listings, &preferences()).expect("compare");

    assert_eq!(comparisons[0].listing_id.0, "suburb");
    assert_close(comparisons[0].value_score, 60.0);
    assert_close(comparisons[0].affordability_ratio, 0.4);
    assert_eq!(comparisons[1].listing_id.0, "downtown");
    assert_eq!(comparisons[1].value_score, 0.0);
}

#[test]
fn comparison_keeps_input_order_for_equal_values() {
    let listings = vec![
        sparse_listing("over-a", 2500.0),
        sparse_listing("over-b", 3100.0),
        sparse_listing("fits", 1000.0),
    ];

    let ids: Vec<String> = compare_listings(&listings, &preferences())
        .expect("compare")
        .into_iter()
        .map(|comparison| comparison.listing_id.0)
        .collect();

    assert_eq!(ids, vec!["fits", "over-a", "over-b"]);
}

#[test]
fn analysis_collects_every_view() {
    let analysis =
        analyze_budget(&featured_listing(), &international_preferences()).expect("analysis");

    assert_close(analysis.total_monthly_cost, 1550.0);
    assert_close(analysis.affordability_ratio, 0.775);
    assert_eq!(analysis.deposit_schedule.first_month, 2650.0);
    assert_eq!(analysis.what_if_scenarios.len(), 6);
    assert_eq!(analysis.affordability_gauge.status, GaugeStatus::Danger);
    assert!(analysis.affordability_gauge.percentage < 25);
    assert_eq!(
        analysis.recommendations,
        vec![
            "This housing exceeds 50% of your budget - consider more affordable options",
            "Utilities not included - budget for variable costs",
            "Consider accessibility modifications that may require additional budget",
            "Factor in currency exchange fluctuations plus additional documentation and application fees",
        ]
    );
}

#[test]
fn recommendations_flag_large_deposits() {
    let mut listing = sparse_listing("deposit-heavy", 500.0);
    listing.deposit = 4500.0;
    listing.utilities_included = true;

    let advice = recommendations(&listing, 2000.0, &preferences()).expect("advice");
    assert_eq!(
        advice,
        vec![
            "This housing uses 30-50% of your budget - ensure you have enough for other expenses",
            "High deposit required - ensure you have sufficient savings",
        ]
    );
}

#[test]
fn analysis_rejects_non_positive_budget() {
    let mut preferences = preferences();
    preferences.budget = -100.0;

    assert_eq!(
        analyze_budget(&featured_listing(), &preferences),
        Err(PreconditionViolation::NonPositiveBudget(-100.0))
    );
}
