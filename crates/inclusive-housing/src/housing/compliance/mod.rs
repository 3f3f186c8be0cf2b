//! Fair-housing (FHA) and accessibility (ADA) checklist over listing fields.

mod report;

pub use report::render_report;

use super::domain::Listing;
use serde::{Deserialize, Serialize};

const ADA_MINIMUM_DOORWAY_INCHES: f64 = 32.0;
const PERFECT_SCORE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_flag_count(count: usize) -> Self {
        if count >= 4 {
            Self::High
        } else if count >= 2 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Which compliance flag a failed rule clears, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Statute {
    FairHousing,
    Accessibility,
    Advisory,
}

struct ComplianceRule {
    field: &'static str,
    statute: Statute,
    penalty: i32,
    recommendation: &'static str,
    violated: fn(&Listing) -> bool,
}

fn lacks_adequate_doorway(listing: &Listing) -> bool {
    listing
        .doorway_inches()
        .map(|width| width < ADA_MINIMUM_DOORWAY_INCHES)
        .unwrap_or(true)
}

/// Evaluated in order; flagged fields and recommendations follow this order.
const RULES: [ComplianceRule; 8] = [
    ComplianceRule {
        field: "Anti-discrimination policy",
        statute: Statute::FairHousing,
        penalty: 20,
        recommendation: "Implement clear anti-discrimination policy",
        violated: |listing| !listing.anti_discrimination_policy,
    },
    ComplianceRule {
        field: "Communication responsiveness",
        statute: Statute::FairHousing,
        penalty: 15,
        recommendation: "Improve communication responsiveness",
        violated: |listing| !listing.responsive_communications,
    },
    ComplianceRule {
        field: "Accessible entry",
        statute: Statute::Accessibility,
        penalty: 25,
        recommendation: "Provide step-free entry or elevator access",
        violated: |listing| !listing.step_free_entry && !listing.elevator,
    },
    ComplianceRule {
        field: "Doorway width",
        statute: Statute::Accessibility,
        penalty: 20,
        recommendation: "Ensure doorways are at least 32 inches wide",
        violated: lacks_adequate_doorway,
    },
    ComplianceRule {
        field: "Accessible bathroom",
        statute: Statute::Accessibility,
        penalty: 15,
        recommendation: "Provide accessible bathroom facilities",
        violated: |listing| !listing.accessible_bathroom,
    },
    ComplianceRule {
        field: "Accessible parking",
        statute: Statute::Accessibility,
        penalty: 10,
        recommendation: "Provide accessible parking spaces",
        violated: |listing| !listing.accessible_parking,
    },
    ComplianceRule {
        field: "Limited management hours",
        statute: Statute::Advisory,
        penalty: 5,
        recommendation: "Consider extending management hours for better accessibility",
        violated: |listing| listing.management_hours.is_limited(),
    },
    ComplianceRule {
        field: "Street lighting",
        statute: Statute::Advisory,
        penalty: 5,
        recommendation: "Ensure adequate street lighting for safety",
        violated: |listing| !listing.well_lit_streets,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub fha_compliant: bool,
    pub ada_compliant: bool,
    pub risk_level: RiskLevel,
    pub flagged_fields: Vec<String>,
    pub recommendations: Vec<String>,
    pub compliance_score: u8,
}

pub fn assess_compliance(listing: &Listing) -> ComplianceCheck {
    let mut flagged_fields = Vec::new();
    let mut recommendations = Vec::new();
    let mut fha_compliant = true;
    let mut ada_compliant = true;
    let mut score = PERFECT_SCORE;

    for rule in RULES.iter().filter(|rule| (rule.violated)(listing)) {
        flagged_fields.push(rule.field.to_string());
        recommendations.push(rule.recommendation.to_string());
        score -= rule.penalty;
        match rule.statute {
            Statute::FairHousing => fha_compliant = false,
            Statute::Accessibility => ada_compliant = false,
            Statute::Advisory => {}
        }
    }

    if !fha_compliant || !ada_compliant {
        recommendations.push("Consult with legal counsel for compliance review".to_string());
        recommendations.push("Consider accessibility audit by certified professional".to_string());
    }

    ComplianceCheck {
        fha_compliant,
        ada_compliant,
        risk_level: RiskLevel::from_flag_count(flagged_fields.len()),
        flagged_fields,
        recommendations,
        compliance_score: score.clamp(0, PERFECT_SCORE) as u8,
    }
}

/// Physical accessibility barriers, surfaced separately from the checklist.
pub fn accessibility_violations(listing: &Listing) -> Vec<String> {
    let mut violations = Vec::new();

    if !listing.step_free_entry && !listing.elevator {
        violations.push("No accessible entry - requires step-free entry or elevator".to_string());
    }

    match listing.doorway_width {
        Some(width) if width.inches() < ADA_MINIMUM_DOORWAY_INCHES => violations.push(format!(
            "Doorway width ({width}) below ADA minimum (32\")"
        )),
        Some(_) => {}
        None => violations.push("Doorway width not reported - ADA minimum is 32\"".to_string()),
    }

    if !listing.accessible_bathroom {
        violations.push("No accessible bathroom facilities".to_string());
    }
    if !listing.accessible_parking {
        violations.push("No accessible parking spaces".to_string());
    }

    violations
}

/// Leasing policies that may exclude protected or vulnerable applicants.
pub fn discrimination_risks(listing: &Listing) -> Vec<String> {
    let mut risks = Vec::new();

    if !listing.accepts_international {
        risks.push("May discriminate against international students".to_string());
    }
    if !listing.no_ssn_required {
        risks.push("SSN requirement may exclude certain populations".to_string());
    }
    if !listing.cosigner_allowed {
        risks.push("No cosigner option may limit accessibility".to_string());
    }
    if !listing.responsive_communications {
        risks.push("Poor communication may indicate discriminatory practices".to_string());
    }

    risks
}

pub fn mitigation_strategies(check: &ComplianceCheck) -> Vec<String> {
    let mut strategies: Vec<&str> = Vec::new();

    if !check.fha_compliant {
        strategies.extend([
            "Implement comprehensive anti-discrimination training for staff",
            "Develop clear, written policies for tenant selection and communication",
            "Establish regular compliance monitoring and review processes",
        ]);
    }

    if !check.ada_compliant {
        strategies.extend([
            "Conduct accessibility audit by certified professional",
            "Develop accessibility improvement plan with timeline",
            "Consider reasonable accommodations for existing barriers",
        ]);
    }

    match check.risk_level {
        RiskLevel::High => strategies.extend([
            "Immediate legal consultation recommended",
            "Consider temporary compliance measures while improvements are made",
            "Develop comprehensive compliance action plan",
        ]),
        RiskLevel::Medium => strategies.extend([
            "Schedule compliance review within 30 days",
            "Implement interim accessibility measures where possible",
            "Develop staff training program on fair housing laws",
        ]),
        RiskLevel::Low => {}
    }

    strategies.into_iter().map(str::to_string).collect()
}
