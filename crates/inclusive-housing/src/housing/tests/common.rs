use crate::housing::domain::{
    DoorwayWidth, InclusivityNeeds, Listing, ManagementHours, UserPreferences,
};

/// Near-campus unit with every accessibility and inclusivity feature.
pub(super) fn featured_listing() -> Listing {
    let mut listing = Listing::new("lst-1001", 1300.0, 150.0, 1200.0);
    listing.title = "Maple Commons 2B".to_string();
    listing.address = Some("401 College Ave".to_string());
    listing.bedrooms = 2;
    listing.bathrooms = 1;
    listing.distance_to_campus_km = Some(0.4);
    listing.walk_minutes = Some(8.0);
    listing.bus_headway_minutes = Some(10.0);
    listing.step_free_entry = true;
    listing.elevator = true;
    listing.doorway_width = Some(DoorwayWidth::Inches(36.0));
    listing.accessible_bathroom = true;
    listing.accessible_parking = true;
    listing.accepts_international = true;
    listing.no_ssn_required = true;
    listing.cosigner_allowed = true;
    listing.anti_discrimination_policy = true;
    listing.responsive_communications = true;
    listing.well_lit_streets = true;
    listing.management_hours = ManagementHours::AroundTheClock;
    listing.neighborhood_safety_score = Some(85.0);
    listing
}

/// Listing that reports nothing beyond its costs.
pub(super) fn sparse_listing(id: &str, rent: f64) -> Listing {
    Listing::new(id, rent, 0.0, 0.0)
}

pub(super) fn preferences() -> UserPreferences {
    UserPreferences::with_budget(2000.0)
}

pub(super) fn international_preferences() -> UserPreferences {
    let mut preferences = preferences();
    preferences.accessibility_needs = vec!["wheelchair".to_string()];
    preferences.inclusivity = InclusivityNeeds {
        international_student: true,
        needs_no_ssn: true,
        needs_cosigner: false,
    };
    preferences
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
