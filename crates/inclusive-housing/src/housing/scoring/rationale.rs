//! Structured explanations for sub-scores.
//!
//! Calculators record the facts that moved a score; turning those facts into
//! a sentence happens here, so tests can assert on either side independently.

use super::weights::ScoreCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityBand {
    Excellent,
    Good,
    Moderate,
    HighCost,
}

impl AffordabilityBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent affordability",
            Self::Good => "Good affordability",
            Self::Moderate => "Moderate affordability",
            Self::HighCost => "High cost",
        }
    }
}

/// How a single factor moved the running score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Effect {
    Points(f64),
    Multiplier(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub label: String,
    pub effect: Effect,
}

impl Factor {
    pub fn points(label: impl Into<String>, points: f64) -> Self {
        Self {
            label: label.into(),
            effect: Effect::Points(points),
        }
    }

    pub fn multiplier(label: impl Into<String>, factor: f64) -> Self {
        Self {
            label: label.into(),
            effect: Effect::Multiplier(factor),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Rationale {
    Affordability {
        band: AffordabilityBand,
        total_monthly_cost: f64,
        budget_ratio: f64,
    },
    Factors {
        category: ScoreCategory,
        factors: Vec<Factor>,
    },
}

impl Rationale {
    pub fn factors(&self) -> &[Factor] {
        match self {
            Self::Affordability { .. } => &[],
            Self::Factors { factors, .. } => factors,
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Affordability {
                band,
                total_monthly_cost,
                budget_ratio,
            } => format!(
                "{}: ${:.0}/month is {:.1}% of your budget",
                band.label(),
                total_monthly_cost,
                budget_ratio * 100.0
            ),
            Self::Factors { category, factors } => render_factors(*category, factors),
        }
    }
}

fn render_factors(category: ScoreCategory, factors: &[Factor]) -> String {
    let (heading, empty) = match category {
        ScoreCategory::Accessibility => (
            "Accessibility features",
            Some("Limited accessibility features available"),
        ),
        ScoreCategory::Inclusivity => (
            "Inclusivity features",
            Some("Limited inclusivity features available"),
        ),
        ScoreCategory::Safety => ("Safety factors", None),
        ScoreCategory::Commute => ("Commute factors", None),
        ScoreCategory::Affordability => ("Affordability factors", None),
    };

    match (factors.is_empty(), empty) {
        (true, Some(fallback)) => fallback.to_string(),
        _ => {
            let labels: Vec<&str> = factors.iter().map(|factor| factor.label.as_str()).collect();
            format!("{heading}: {}", labels.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn affordability_renders_total_and_percentage() {
        let rationale = Rationale::Affordability {
            band: AffordabilityBand::Moderate,
            total_monthly_cost: 1350.4,
            budget_ratio: 0.6752,
        };
        assert_eq!(
            rationale.render(),
            "Moderate affordability: $1350/month is 67.5% of your budget"
        );
    }

    #[test]
    fn empty_accessibility_uses_limited_phrase() {
        let rationale = Rationale::Factors {
            category: ScoreCategory::Accessibility,
            factors: Vec::new(),
        };
        assert_eq!(rationale.render(), "Limited accessibility features available");
    }

    #[test]
    fn factors_render_in_recorded_order() {
        let rationale = Rationale::Factors {
            category: ScoreCategory::Commute,
            factors: vec![
                Factor::points("Short walk (≤10 min)", 35.0),
                Factor::multiplier("Winter conditions penalty", 0.9),
            ],
        };
        assert_eq!(
            rationale.render(),
            "Commute factors: Short walk (≤10 min), Winter conditions penalty"
        );
    }
}
