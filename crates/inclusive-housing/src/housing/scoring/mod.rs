mod rationale;
pub mod rules;
mod weights;

pub use rationale::{AffordabilityBand, Effect, Factor, Rationale};
pub use weights::{ScoreCategory, ScoreWeights, DI_WEIGHTS};

use super::domain::{Listing, PreconditionViolation, UserPreferences};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Output of a single calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub category: ScoreCategory,
    pub score: f64,
    pub rationale: Rationale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl Tier {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 90.0 {
            Self::Gold
        } else if overall >= 80.0 {
            Self::Silver
        } else if overall >= 70.0 {
            Self::Bronze
        } else {
            Self::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Gold => "Gold",
            Self::Silver => "Silver",
            Self::Bronze => "Bronze",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// One sentence per sub-score, backing the "why this score?" disclosure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRationale {
    pub affordability: String,
    pub accessibility: String,
    pub safety: String,
    pub commute: String,
    pub inclusivity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiScore {
    pub overall: f64,
    pub affordability: f64,
    pub accessibility: f64,
    pub safety: f64,
    pub commute: f64,
    pub inclusivity: f64,
    pub tier: Tier,
    pub breakdown: String,
    pub rationale: ScoreRationale,
}

impl DiScore {
    pub fn subscore(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Affordability => self.affordability,
            ScoreCategory::Accessibility => self.accessibility,
            ScoreCategory::Safety => self.safety,
            ScoreCategory::Commute => self.commute,
            ScoreCategory::Inclusivity => self.inclusivity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredListing {
    pub listing: Listing,
    pub di_score: DiScore,
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Run all five calculators and combine them with [`DI_WEIGHTS`].
///
/// Fails as a whole when any calculator rejects its input.
pub fn score_listing(
    listing: &Listing,
    preferences: &UserPreferences,
) -> Result<DiScore, PreconditionViolation> {
    preferences.validate()?;

    let affordability = rules::affordability(listing, preferences.budget)?;
    let accessibility = rules::accessibility(listing);
    let safety = rules::safety(listing);
    let commute = rules::commute(listing, preferences.commute.winter_penalty);
    let inclusivity = rules::inclusivity(listing);

    let components = [&affordability, &accessibility, &safety, &commute, &inclusivity];

    let overall: f64 = components
        .iter()
        .map(|component| component.score * DI_WEIGHTS.weight(component.category))
        .sum();
    let overall = round_tenth(overall);

    let breakdown = components
        .iter()
        .map(|component| {
            format!(
                "{}: {:.1} ({}%)",
                component.category.label(),
                round_tenth(component.score),
                DI_WEIGHTS.percent(component.category)
            )
        })
        .collect::<Vec<_>>()
        .join(" | ");

    Ok(DiScore {
        overall,
        affordability: round_tenth(affordability.score),
        accessibility: round_tenth(accessibility.score),
        safety: round_tenth(safety.score),
        commute: round_tenth(commute.score),
        inclusivity: round_tenth(inclusivity.score),
        tier: Tier::from_score(overall),
        breakdown,
        rationale: ScoreRationale {
            affordability: affordability.rationale.render(),
            accessibility: accessibility.rationale.render(),
            safety: safety.rationale.render(),
            commute: commute.rationale.render(),
            inclusivity: inclusivity.rationale.render(),
        },
    })
}

/// Score every listing and order them by overall score, best first.
///
/// Scoring runs in parallel; the sort afterwards is stable, so listings with
/// equal scores keep their input order.
pub fn score_listings(
    listings: &[Listing],
    preferences: &UserPreferences,
) -> Result<Vec<ScoredListing>, PreconditionViolation> {
    let mut scored = listings
        .par_iter()
        .map(|listing| {
            score_listing(listing, preferences).map(|di_score| ScoredListing {
                listing: listing.clone(),
                di_score,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    scored.sort_by(|a, b| b.di_score.overall.total_cmp(&a.di_score.overall));
    debug!(count = scored.len(), "ranked listings by D&I score");
    Ok(scored)
}
