use super::rationale::{AffordabilityBand, Effect, Factor, Rationale};
use super::weights::ScoreCategory;
use super::SubScore;
use crate::housing::domain::{validate_budget, HoursBand, Listing, PreconditionViolation};

const MAX_SCORE: f64 = 100.0;
const DISTANCE_PENALTY: f64 = 0.8;
const WINTER_PENALTY: f64 = 0.9;
const NEIGHBORHOOD_SAFETY_WEIGHT: f64 = 0.25;

pub fn affordability(listing: &Listing, budget: f64) -> Result<SubScore, PreconditionViolation> {
    validate_budget(budget)?;
    listing.validate()?;

    let total_monthly_cost = listing.total_monthly_cost();
    let budget_ratio = total_monthly_cost / budget;

    let (score, band) = if budget_ratio <= 0.3 {
        (100.0, AffordabilityBand::Excellent)
    } else if budget_ratio <= 0.5 {
        (80.0, AffordabilityBand::Good)
    } else if budget_ratio <= 0.7 {
        (60.0, AffordabilityBand::Moderate)
    } else {
        let interpolated = 100.0 - ((budget_ratio - 0.7) / 0.3) * 100.0;
        (interpolated.max(0.0), AffordabilityBand::HighCost)
    };

    Ok(SubScore {
        category: ScoreCategory::Affordability,
        score,
        rationale: Rationale::Affordability {
            band,
            total_monthly_cost,
            budget_ratio,
        },
    })
}

pub fn accessibility(listing: &Listing) -> SubScore {
    let mut factors = Vec::new();

    if listing.step_free_entry {
        factors.push(Factor::points("Step-free entry", 25.0));
    }
    if listing.elevator {
        factors.push(Factor::points("Elevator access", 20.0));
    }
    match listing.doorway_inches() {
        Some(width) if width >= 36.0 => {
            factors.push(Factor::points("ADA-compliant doorways (36\"+ wide)", 20.0));
        }
        Some(width) if width >= 32.0 => {
            factors.push(Factor::points("Wide doorways (32\"+ wide)", 15.0));
        }
        _ => {}
    }
    if listing.accessible_bathroom {
        factors.push(Factor::points("Accessible bathroom", 20.0));
    }
    if listing.accessible_parking {
        factors.push(Factor::points("Accessible parking", 15.0));
    }

    additive(ScoreCategory::Accessibility, factors)
}

pub fn safety(listing: &Listing) -> SubScore {
    let mut factors = Vec::new();

    factors.push(match listing.distance_to_campus_km {
        Some(km) if km <= 0.5 => Factor::points("Very close to campus", 30.0),
        Some(km) if km <= 1.0 => Factor::points("Close to campus", 25.0),
        Some(km) if km <= 1.5 => Factor::points("Moderate distance to campus", 20.0),
        Some(_) => Factor::points("Far from campus", 10.0),
        None => Factor::points("Distance to campus unknown", 10.0),
    });

    if listing.well_lit_streets {
        factors.push(Factor::points("Well-lit streets", 20.0));
    }

    factors.push(match listing.management_hours.band() {
        HoursBand::AroundTheClock => Factor::points("24/7 management", 25.0),
        HoursBand::Extended => Factor::points("Extended management hours", 20.0),
        HoursBand::Standard => Factor::points("Standard management hours", 15.0),
    });

    factors.push(match listing.neighborhood_safety_score {
        Some(rating) => Factor::points(
            format!("Neighborhood safety: {rating}/100"),
            rating * NEIGHBORHOOD_SAFETY_WEIGHT,
        ),
        None => Factor::points("Neighborhood safety: not reported", 0.0),
    });

    additive(ScoreCategory::Safety, factors)
}

pub fn commute(listing: &Listing, winter_penalty: bool) -> SubScore {
    let mut factors = Vec::new();

    factors.push(match listing.walk_minutes {
        Some(minutes) if minutes <= 5.0 => Factor::points("Very short walk (≤5 min)", 40.0),
        Some(minutes) if minutes <= 10.0 => Factor::points("Short walk (≤10 min)", 35.0),
        Some(minutes) if minutes <= 15.0 => Factor::points("Moderate walk (≤15 min)", 30.0),
        Some(minutes) if minutes <= 20.0 => Factor::points("Long walk (≤20 min)", 20.0),
        Some(_) => Factor::points("Very long walk (>20 min)", 10.0),
        None => Factor::points("Walk time unknown", 10.0),
    });

    factors.push(match listing.bus_headway_minutes {
        Some(minutes) if minutes <= 5.0 => Factor::points("Frequent bus service (≤5 min)", 30.0),
        Some(minutes) if minutes <= 10.0 => Factor::points("Regular bus service (≤10 min)", 25.0),
        Some(minutes) if minutes <= 15.0 => Factor::points("Moderate bus service (≤15 min)", 20.0),
        Some(minutes) if minutes <= 20.0 => Factor::points("Limited bus service (≤20 min)", 15.0),
        Some(_) => Factor::points("Infrequent bus service (>20 min)", 10.0),
        None => Factor::points("Bus service unknown", 10.0),
    });

    let far_from_campus = listing
        .distance_to_campus_km
        .map(|km| km > 1.0)
        .unwrap_or(true);
    if far_from_campus {
        factors.push(Factor::multiplier("Distance penalty applied", DISTANCE_PENALTY));
    }
    if winter_penalty {
        factors.push(Factor::multiplier("Winter conditions penalty", WINTER_PENALTY));
    }

    additive(ScoreCategory::Commute, factors)
}

pub fn inclusivity(listing: &Listing) -> SubScore {
    let mut factors = Vec::new();

    if listing.accepts_international {
        factors.push(Factor::points("Accepts international students", 25.0));
    }
    if listing.no_ssn_required {
        factors.push(Factor::points("No SSN required", 20.0));
    }
    if listing.cosigner_allowed {
        factors.push(Factor::points("Allows cosigners", 20.0));
    }
    if listing.anti_discrimination_policy {
        factors.push(Factor::points("Anti-discrimination policy", 20.0));
    }
    if listing.responsive_communications {
        factors.push(Factor::points("Responsive communication", 15.0));
    }

    additive(ScoreCategory::Inclusivity, factors)
}

/// Apply factors in recorded order (points add, multipliers scale the running
/// total) and cap the result.
fn additive(category: ScoreCategory, factors: Vec<Factor>) -> SubScore {
    let raw = factors
        .iter()
        .fold(0.0_f64, |running, factor| match factor.effect {
            Effect::Points(points) => running + points,
            Effect::Multiplier(multiplier) => running * multiplier,
        });

    SubScore {
        category,
        score: raw.clamp(0.0, MAX_SCORE),
        rationale: Rationale::Factors { category, factors },
    }
}
