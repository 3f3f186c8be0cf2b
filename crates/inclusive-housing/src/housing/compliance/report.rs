use std::fmt;

use chrono::NaiveDate;

use super::ComplianceCheck;
use crate::housing::domain::Listing;

const LEGAL_REFERENCES: [(&str, &str); 3] = [
    (
        "Fair Housing Act (FHA)",
        "https://www.hud.gov/program_offices/fair_housing_equal_opp/fair_housing_act_overview",
    ),
    ("Americans with Disabilities Act (ADA)", "https://www.ada.gov/"),
    (
        "Section 504 of the Rehabilitation Act",
        "https://www.hud.gov/program_offices/fair_housing_equal_opp/disabilities/sect504",
    ),
];

const DISCLAIMER: &str = "**Note:** This assessment is for informational purposes only and \
does not constitute legal advice. Consult with qualified legal counsel for compliance matters.";

/// Markdown compliance report for one listing.
///
/// The assessment date is supplied by the caller so identical inputs always
/// produce identical text.
pub fn render_report(listing: &Listing, check: &ComplianceCheck, assessed_on: NaiveDate) -> String {
    ReportView {
        listing,
        check,
        assessed_on,
    }
    .to_string()
}

struct ReportView<'a> {
    listing: &'a Listing,
    check: &'a ComplianceCheck,
    assessed_on: NaiveDate,
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            listing,
            check,
            assessed_on,
        } = self;

        writeln!(f, "# Compliance Assessment Report")?;
        writeln!(f)?;
        writeln!(f, "**Property:** {}", listing.title)?;
        writeln!(
            f,
            "**Address:** {}",
            listing.address.as_deref().unwrap_or("Not provided")
        )?;
        writeln!(f, "**Assessment Date:** {}", assessed_on.format("%B %d, %Y"))?;
        writeln!(f)?;

        writeln!(f, "## Compliance Status")?;
        writeln!(f, "- **FHA Compliant:** {}", yes_no(check.fha_compliant))?;
        writeln!(f, "- **ADA Compliant:** {}", yes_no(check.ada_compliant))?;
        writeln!(f, "- **Risk Level:** {}", check.risk_level.label())?;
        writeln!(f, "- **Compliance Score:** {}/100", check.compliance_score)?;
        writeln!(f)?;

        if !check.flagged_fields.is_empty() {
            writeln!(f, "## Flagged Fields")?;
            for field in &check.flagged_fields {
                writeln!(f, "- {field}")?;
            }
            writeln!(f)?;
        }

        if !check.recommendations.is_empty() {
            writeln!(f, "## Recommendations")?;
            for recommendation in &check.recommendations {
                writeln!(f, "- {recommendation}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "## Legal References")?;
        for (name, url) in LEGAL_REFERENCES {
            writeln!(f, "- [{name}]({url})")?;
        }
        writeln!(f)?;
        writeln!(f, "{DISCLAIMER}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::housing::compliance::assess_compliance;

    #[test]
    fn report_omits_empty_sections() {
        let mut listing = Listing::new("r-1", 1000.0, 100.0, 0.0);
        listing.anti_discrimination_policy = true;
        listing.responsive_communications = true;
        listing.elevator = true;
        listing.doorway_width = Some(crate::housing::domain::DoorwayWidth::Inches(34.0));
        listing.accessible_bathroom = true;
        listing.accessible_parking = true;
        listing.well_lit_streets = true;

        let check = assess_compliance(&listing);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        let report = render_report(&listing, &check, date);

        assert!(report.contains("**Address:** Not provided"));
        assert!(report.contains("**Assessment Date:** March 01, 2024"));
        assert!(!report.contains("## Flagged Fields"));
        assert!(!report.contains("## Recommendations"));
        assert!(report.ends_with("compliance matters.\n"));
    }
}
