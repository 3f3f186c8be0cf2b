use super::common::*;
use crate::housing::budget;
use crate::housing::domain::{DoorwayWidth, PreconditionViolation};
use crate::housing::scoring::{rules, score_listing, score_listings, ScoreCategory, Tier};
use pretty_assertions::assert_eq;

#[test]
fn featured_listing_scores_silver() {
    let score = score_listing(&featured_listing(), &preferences()).expect("score");

    assert_eq!(score.affordability, 75.0);
    assert_eq!(score.accessibility, 100.0);
    assert_eq!(score.safety, 96.3);
    assert_eq!(score.commute, 60.0);
    assert_eq!(score.inclusivity, 100.0);
    assert_eq!(score.overall, 84.5);
    assert_eq!(score.tier, Tier::Silver);
}

#[test]
fn featured_listing_explains_each_subscore() {
    let score = score_listing(&featured_listing(), &preferences()).expect("score");

    assert_eq!(
        score.breakdown,
        "Affordability: 75.0 (35%) | Accessibility: 100.0 (20%) | Safety: 96.3 (20%) | \
Commute: 60.0 (15%) | Inclusivity: 100.0 (10%)"
    );
    assert_eq!(
        score.rationale.affordability,
        "High cost: $1550/month is 77.5% of your budget"
    );
    assert_eq!(
        score.rationale.accessibility,
        "Accessibility features: Step-free entry, Elevator access, \
ADA-compliant doorways (36\"+ wide), Accessible bathroom, Accessible parking"
    );
    assert_eq!(
        score.rationale.safety,
        "Safety factors: Very close to campus, Well-lit streets, 24/7 management, \
Neighborhood safety: 85/100"
    );
    assert_eq!(
        score.rationale.commute,
        "Commute factors: Short walk (≤10 min), Regular bus service (≤10 min)"
    );
}

#[test]
fn zero_budget_fails_the_whole_score() {
    let mut preferences = preferences();
    preferences.budget = 0.0;

    assert_eq!(
        score_listing(&featured_listing(), &preferences),
        Err(PreconditionViolation::NonPositiveBudget(0.0))
    );
}

#[test]
fn listing_without_accessibility_features_scores_zero() {
    let mut listing = featured_listing();
    listing.step_free_entry = false;
    listing.elevator = false;
    listing.doorway_width = None;
    listing.accessible_bathroom = false;
    listing.accessible_parking = false;

    let score = score_listing(&listing, &preferences()).expect("score");
    assert_eq!(score.accessibility, 0.0);
    assert!(score.rationale.accessibility.contains("Limited accessibility"));
}

#[test]
fn centimeter_doorways_score_like_their_inch_equivalent() {
    let mut metric = featured_listing();
    metric.doorway_width = Some(DoorwayWidth::Centimeters(82.0));
    let mut imperial = featured_listing();
    imperial.doorway_width = Some(DoorwayWidth::Inches(82.0 / 2.54));

    assert_eq!(
        rules::accessibility(&metric).score,
        rules::accessibility(&imperial).score
    );
    assert_eq!(rules::accessibility(&metric).score, 95.0);
}

#[test]
fn overall_matches_weighted_subscores() {
    let score = score_listing(&featured_listing(), &international_preferences()).expect("score");

    let reconstructed: f64 = ScoreCategory::ordered()
        .into_iter()
        .map(|category| score.subscore(category) * crate::housing::DI_WEIGHTS.weight(category))
        .sum();
    assert!((score.overall - reconstructed).abs() <= 0.1);
}

#[test]
fn affordability_and_budget_share_monthly_cost() {
    let listing = featured_listing();
    let scored = rules::affordability(&listing, 2000.0).expect("affordability");

    match scored.rationale {
        crate::housing::scoring::Rationale::Affordability {
            total_monthly_cost, ..
        } => assert_eq!(
            total_monthly_cost.to_bits(),
            budget::total_monthly_cost(&listing).to_bits()
        ),
        other => panic!("expected affordability rationale, got {other:?}"),
    }
}

#[test]
fn ranking_orders_best_first_and_keeps_ties_stable() {
    let listings = vec![
        sparse_listing("tie-a", 1000.0),
        featured_listing(),
        sparse_listing("tie-b", 1000.0),
        sparse_listing("pricey", 1900.0),
    ];

    let ranked = score_listings(&listings, &preferences()).expect("rank");
    let ids: Vec<&str> = ranked
        .iter()
        .map(|entry| entry.listing.id.0.as_str())
        .collect();

    assert_eq!(ids, vec!["lst-1001", "tie-a", "tie-b", "pricey"]);
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].di_score.overall >= pair[1].di_score.overall));
}

#[test]
fn ranking_aborts_on_invalid_listing() {
    let listings = vec![featured_listing(), sparse_listing("broken", -5.0)];
    assert!(matches!(
        score_listings(&listings, &preferences()),
        Err(PreconditionViolation::InvalidAmount { field: "rent", .. })
    ));
}

#[test]
fn sparse_listing_needs_improvement() {
    let score = score_listing(&sparse_listing("bare", 400.0), &preferences()).expect("score");

    assert_eq!(score.affordability, 100.0);
    assert_eq!(score.accessibility, 0.0);
    assert_eq!(score.safety, 25.0);
    assert_eq!(score.commute, 16.0);
    assert_eq!(score.inclusivity, 0.0);
    assert_eq!(score.tier, Tier::NeedsImprovement);
    assert_eq!(
        score.rationale.inclusivity,
        "Limited inclusivity features available"
    );
}
