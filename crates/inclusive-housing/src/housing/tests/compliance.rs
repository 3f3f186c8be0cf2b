use super::common::*;
use crate::housing::compliance::{
    accessibility_violations, assess_compliance, discrimination_risks, mitigation_strategies,
    render_report, RiskLevel,
};
use crate::housing::domain::{Listing, ManagementHours};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;

fn office_hours_listing() -> Listing {
    let mut listing = featured_listing();
    listing.anti_discrimination_policy = false;
    listing.well_lit_streets = false;
    listing.management_hours = ManagementHours::parse("9-17");
    listing
}

#[test]
fn featured_listing_is_fully_compliant() {
    let listing = featured_listing();
    let check = assess_compliance(&listing);

    assert!(check.fha_compliant && check.ada_compliant);
    assert_eq!(check.compliance_score, 100);
    assert!(accessibility_violations(&listing).is_empty());
    assert!(discrimination_risks(&listing).is_empty());
    assert!(mitigation_strategies(&check).is_empty());
}

#[test]
fn missing_policy_fails_fair_housing_only() {
    let check = assess_compliance(&office_hours_listing());

    assert!(!check.fha_compliant);
    assert!(check.ada_compliant);
    assert_eq!(check.risk_level, RiskLevel::Medium);
    assert_eq!(check.compliance_score, 70);
    assert_eq!(
        mitigation_strategies(&check),
        vec![
            "Implement comprehensive anti-discrimination training for staff",
            "Develop clear, written policies for tenant selection and communication",
            "Establish regular compliance monitoring and review processes",
            "Schedule compliance review within 30 days",
            "Implement interim accessibility measures where possible",
            "Develop staff training program on fair housing laws",
        ]
    );
}

#[test]
fn unknown_doorway_is_flagged() {
    let mut listing = featured_listing();
    listing.doorway_width = None;

    let check = assess_compliance(&listing);
    assert!(!check.ada_compliant);
    assert_eq!(check.flagged_fields, vec!["Doorway width"]);
    assert_eq!(check.compliance_score, 80);
    assert_eq!(
        accessibility_violations(&listing),
        vec!["Doorway width not reported - ADA minimum is 32\""]
    );
}

#[test]
fn score_never_increases_as_violations_accumulate() {
    let mut listing = featured_listing();
    let mut previous = assess_compliance(&listing).compliance_score;

    let strip: [fn(&mut Listing); 8] = [
        |l| l.anti_discrimination_policy = false,
        |l| l.responsive_communications = false,
        |l| l.step_free_entry = false,
        |l| l.elevator = false,
        |l| l.doorway_width = None,
        |l| l.accessible_bathroom = false,
        |l| l.accessible_parking = false,
        |l| l.management_hours = ManagementHours::parse("9-18"),
    ];

    for remove in strip {
        remove(&mut listing);
        let current = assess_compliance(&listing).compliance_score;
        assert!(current <= previous, "{current} > {previous}");
        previous = current;
    }
    assert_eq!(previous, 0);
}

#[test]
fn report_matches_golden_text() {
    let listing = office_hours_listing();
    let check = assess_compliance(&listing);
    let assessed_on = NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date");

    let expected = "\
# Compliance Assessment Report

**Property:** Maple Commons 2B
**Address:** 401 College Ave
**Assessment Date:** September 24, 2025

## Compliance Status
- **FHA Compliant:** No
- **ADA Compliant:** Yes
- **Risk Level:** Medium
- **Compliance Score:** 70/100

## Flagged Fields
- Anti-discrimination policy
- Limited management hours
- Street lighting

## Recommendations
- Implement clear anti-discrimination policy
- Consider extending management hours for better accessibility
- Ensure adequate street lighting for safety
- Consult with legal counsel for compliance review
- Consider accessibility audit by certified professional

## Legal References
- [Fair Housing Act (FHA)](https://www.hud.gov/program_offices/fair_housing_equal_opp/fair_housing_act_overview)
- [Americans with Disabilities Act (ADA)](https://www.ada.gov/)
- [Section 504 of the Rehabilitation Act](https://www.hud.gov/program_offices/fair_housing_equal_opp/disabilities/sect504)

**Note:** This assessment is for informational purposes only and does not constitute legal advice. Consult with qualified legal counsel for compliance matters.
";

    assert_eq!(render_report(&listing, &check, assessed_on), expected);
}
