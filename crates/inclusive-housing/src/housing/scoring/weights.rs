use serde::{Deserialize, Serialize};

/// The five dimensions of a D&I score, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Affordability,
    Accessibility,
    Safety,
    Commute,
    Inclusivity,
}

impl ScoreCategory {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Affordability,
            Self::Accessibility,
            Self::Safety,
            Self::Commute,
            Self::Inclusivity,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Affordability => "Affordability",
            Self::Accessibility => "Accessibility",
            Self::Safety => "Safety",
            Self::Commute => "Commute",
            Self::Inclusivity => "Inclusivity",
        }
    }
}

/// Weight table applied by the aggregator. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub affordability: f64,
    pub accessibility: f64,
    pub safety: f64,
    pub commute: f64,
    pub inclusivity: f64,
}

pub const DI_WEIGHTS: ScoreWeights = ScoreWeights {
    affordability: 0.35,
    accessibility: 0.20,
    safety: 0.20,
    commute: 0.15,
    inclusivity: 0.10,
};

impl ScoreWeights {
    pub const fn weight(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Affordability => self.affordability,
            ScoreCategory::Accessibility => self.accessibility,
            ScoreCategory::Safety => self.safety,
            ScoreCategory::Commute => self.commute,
            ScoreCategory::Inclusivity => self.inclusivity,
        }
    }

    /// Whole-number percentage shown next to each sub-score.
    pub fn percent(&self, category: ScoreCategory) -> u8 {
        (self.weight(category) * 100.0).round() as u8
    }

    pub fn total(&self) -> f64 {
        ScoreCategory::ordered()
            .into_iter()
            .map(|category| self.weight(category))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((DI_WEIGHTS.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn percentages_match_published_weights() {
        let percents: Vec<u8> = ScoreCategory::ordered()
            .into_iter()
            .map(|category| DI_WEIGHTS.percent(category))
            .collect();
        assert_eq!(percents, vec![35, 20, 20, 15, 10]);
    }
}
