//! Budget planning derived from the same cost arithmetic as the affordability
//! sub-score.

use super::domain::{validate_budget, Listing, ListingId, PreconditionViolation, UserPreferences};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

const EMERGENCY_FUND_MONTHS: f64 = 3.0;
const HIGH_DEPOSIT_BUDGET_MULTIPLE: f64 = 2.0;

/// Longest projection [`budget_timeline`] will build (ten years).
pub const MAX_TIMELINE_MONTHS: u32 = 120;

/// Rent plus utilities plus the deposit amortized over twelve months.
///
/// The affordability sub-score uses this exact computation.
pub fn total_monthly_cost(listing: &Listing) -> f64 {
    listing.total_monthly_cost()
}

pub fn affordability_ratio(total_cost: f64, budget: f64) -> Result<f64, PreconditionViolation> {
    validate_budget(budget)?;
    Ok(total_cost / budget)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepositSchedule {
    pub first_month: f64,
    pub last_month: f64,
    pub security_deposit: f64,
}

pub fn deposit_schedule(listing: &Listing) -> DepositSchedule {
    DepositSchedule {
        first_month: listing.rent + listing.utilities + listing.deposit,
        last_month: listing.rent + listing.utilities,
        security_deposit: listing.deposit,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfScenario {
    pub scenario: String,
    pub impact: String,
    pub new_cost: f64,
}

impl WhatIfScenario {
    fn increase(scenario: &str, base_cost: f64, increase: f64) -> Self {
        Self {
            scenario: scenario.to_string(),
            impact: format!("Monthly cost would increase by ${increase:.2}"),
            new_cost: base_cost + increase,
        }
    }
}

/// Fixed, ordered list of hypothetical cost changes.
pub fn what_if_scenarios(
    listing: &Listing,
    budget: f64,
) -> Result<Vec<WhatIfScenario>, PreconditionViolation> {
    validate_budget(budget)?;
    listing.validate()?;

    let base = total_monthly_cost(listing);
    let rent = listing.rent;
    let utilities = listing.utilities;
    let emergency_fund = base * EMERGENCY_FUND_MONTHS;

    Ok(vec![
        WhatIfScenario::increase("Rent increases by 5% next year", base, rent * 0.05),
        WhatIfScenario::increase("Rent increases by 10% next year", base, rent * 0.10),
        WhatIfScenario::increase("Utilities increase by 20%", base, utilities * 0.20),
        WhatIfScenario::increase("Utilities increase by 50%", base, utilities * 0.50),
        WhatIfScenario::increase(
            "Both rent and utilities increase by 10%",
            base,
            (rent + utilities) * 0.10,
        ),
        WhatIfScenario {
            scenario: "Need 3-month emergency fund".to_string(),
            impact: format!("Should save ${emergency_fund:.2} for emergencies"),
            new_cost: emergency_fund,
        },
    ])
}

/// Advisory strings in fixed rule order; each rule contributes at most one.
pub fn recommendations(
    listing: &Listing,
    budget: f64,
    preferences: &UserPreferences,
) -> Result<Vec<String>, PreconditionViolation> {
    let ratio = affordability_ratio(total_monthly_cost(listing), budget)?;
    let mut advice = Vec::new();

    advice.push(
        if ratio > 0.5 {
            "This housing exceeds 50% of your budget - consider more affordable options"
        } else if ratio > 0.3 {
            "This housing uses 30-50% of your budget - ensure you have enough for other expenses"
        } else {
            "This housing fits well within your budget"
        }
        .to_string(),
    );

    if listing.deposit > budget * HIGH_DEPOSIT_BUDGET_MULTIPLE {
        advice.push("High deposit required - ensure you have sufficient savings".to_string());
    }

    if !listing.utilities_included {
        advice.push("Utilities not included - budget for variable costs".to_string());
    }

    if !preferences.accessibility_needs.is_empty() {
        advice.push(
            "Consider accessibility modifications that may require additional budget".to_string(),
        );
    }

    if preferences.inclusivity.international_student {
        advice.push(
            "Factor in currency exchange fluctuations plus additional documentation and application fees"
                .to_string(),
        );
    }

    Ok(advice)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeStatus {
    Excellent,
    Good,
    Caution,
    Danger,
}

impl GaugeStatus {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent! This housing fits comfortably within your budget.",
            Self::Good => "Good fit! This housing uses a reasonable portion of your budget.",
            Self::Caution => "Caution: This housing uses a significant portion of your budget.",
            Self::Danger => "Warning: This housing may strain your budget significantly.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityGauge {
    pub status: GaugeStatus,
    /// Share of the budget left after housing costs, 0-100.
    pub percentage: u8,
    pub message: String,
}

pub fn affordability_gauge(ratio: f64) -> AffordabilityGauge {
    let status = if ratio <= 0.3 {
        GaugeStatus::Excellent
    } else if ratio <= 0.5 {
        GaugeStatus::Good
    } else if ratio <= 0.7 {
        GaugeStatus::Caution
    } else {
        GaugeStatus::Danger
    };

    let remaining = ((1.0 - ratio) * 100.0).round().clamp(0.0, 100.0);

    AffordabilityGauge {
        status,
        percentage: remaining as u8,
        message: status.message().to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetAnalysis {
    pub total_monthly_cost: f64,
    pub affordability_ratio: f64,
    pub deposit_schedule: DepositSchedule,
    pub what_if_scenarios: Vec<WhatIfScenario>,
    pub recommendations: Vec<String>,
    pub affordability_gauge: AffordabilityGauge,
}

pub fn analyze_budget(
    listing: &Listing,
    preferences: &UserPreferences,
) -> Result<BudgetAnalysis, PreconditionViolation> {
    preferences.validate()?;
    listing.validate()?;

    let budget = preferences.budget;
    let total_monthly_cost = total_monthly_cost(listing);
    let affordability_ratio = affordability_ratio(total_monthly_cost, budget)?;

    Ok(BudgetAnalysis {
        total_monthly_cost,
        affordability_ratio,
        deposit_schedule: deposit_schedule(listing),
        what_if_scenarios: what_if_scenarios(listing, budget)?,
        recommendations: recommendations(listing, budget, preferences)?,
        affordability_gauge: affordability_gauge(affordability_ratio),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingComparison {
    pub listing_id: ListingId,
    pub title: String,
    pub total_cost: f64,
    pub affordability_ratio: f64,
    pub value_score: f64,
}

/// Rank listings by how much of the budget they leave over, best first.
///
/// The sort is stable: equal value scores keep their input order.
pub fn compare_listings(
    listings: &[Listing],
    preferences: &UserPreferences,
) -> Result<Vec<ListingComparison>, PreconditionViolation> {
    preferences.validate()?;
    let budget = preferences.budget;

    let mut comparisons = listings
        .par_iter()
        .map(|listing| -> Result<ListingComparison, PreconditionViolation> {
            listing.validate()?;
            let total_cost = total_monthly_cost(listing);
            let value_score = ((budget - total_cost) / budget * 100.0).max(0.0);
            Ok(ListingComparison {
                listing_id: listing.id.clone(),
                title: listing.title.clone(),
                total_cost,
                affordability_ratio: affordability_ratio(total_cost, budget)?,
                value_score,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    comparisons.sort_by(|a, b| b.value_score.total_cmp(&a.value_score));
    Ok(comparisons)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsPotential {
    pub monthly_savings: f64,
    /// `None` when the goal cannot be reached at the current savings rate.
    pub months_to_goal: Option<f64>,
    pub achievable: bool,
}

pub fn savings_potential(
    listing: &Listing,
    budget: f64,
    goal: f64,
) -> Result<SavingsPotential, PreconditionViolation> {
    validate_budget(budget)?;
    listing.validate()?;

    let monthly_savings = budget - total_monthly_cost(listing);
    let months = goal / monthly_savings;
    let months_to_goal = months.is_finite().then_some(months);
    let achievable = monthly_savings > 0.0 && months_to_goal.is_some_and(|months| months > 0.0);

    Ok(SavingsPotential {
        monthly_savings,
        months_to_goal,
        achievable,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineMonth {
    pub month: u32,
    pub rent: f64,
    pub utilities: f64,
    pub total: f64,
    pub cumulative: f64,
}

/// Recurring spend month by month; the deposit is not part of the timeline.
///
/// `months` is capped at [`MAX_TIMELINE_MONTHS`].
pub fn budget_timeline(listing: &Listing, months: u32) -> Vec<TimelineMonth> {
    let total = listing.rent + listing.utilities;
    (1..=months.min(MAX_TIMELINE_MONTHS))
        .scan(0.0, |cumulative, month| {
            *cumulative += total;
            Some(TimelineMonth {
                month,
                rent: listing.rent,
                utilities: listing.utilities,
                total,
                cumulative: *cumulative,
            })
        })
        .collect()
}
