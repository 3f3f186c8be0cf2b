use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimeters per inch, used to compare metric doorway measurements.
pub const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub String);

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Doorway clearance as reported by the listing source.
///
/// A bare number reads as inches, the unit legacy listing documents used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "DoorwayWidthInput")]
pub enum DoorwayWidth {
    Inches(f64),
    Centimeters(f64),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedDoorwayWidth {
    Inches(f64),
    Centimeters(f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DoorwayWidthInput {
    Bare(f64),
    Tagged(TaggedDoorwayWidth),
}

impl From<DoorwayWidthInput> for DoorwayWidth {
    fn from(value: DoorwayWidthInput) -> Self {
        match value {
            DoorwayWidthInput::Bare(inches)
            | DoorwayWidthInput::Tagged(TaggedDoorwayWidth::Inches(inches)) => Self::Inches(inches),
            DoorwayWidthInput::Tagged(TaggedDoorwayWidth::Centimeters(cm)) => Self::Centimeters(cm),
        }
    }
}

impl DoorwayWidth {
    pub fn inches(self) -> f64 {
        match self {
            Self::Inches(value) => value,
            Self::Centimeters(value) => value / CM_PER_INCH,
        }
    }

    fn raw(self) -> f64 {
        match self {
            Self::Inches(value) | Self::Centimeters(value) => value,
        }
    }
}

impl fmt::Display for DoorwayWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inches(value) => write!(f, "{value}\""),
            Self::Centimeters(value) => write!(f, "{value}cm"),
        }
    }
}

/// On-site management availability.
///
/// Serialized as the raw schedule string so listings round-trip through the
/// same JSON shape the data loader produces (`"24/7"`, `"9-17"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum ManagementHours {
    AroundTheClock,
    Schedule(String),
    #[default]
    Unknown,
}

/// Banding used by the safety sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursBand {
    AroundTheClock,
    Extended,
    Standard,
}

const EXTENDED_HOUR_PATTERNS: [&str; 2] = ["8-22", "9-19"];
const LIMITED_HOUR_SCHEDULES: [&str; 2] = ["9-17", "9-18"];

impl ManagementHours {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Unknown
        } else if trimmed == "24/7" {
            Self::AroundTheClock
        } else {
            Self::Schedule(trimmed.to_string())
        }
    }

    pub fn band(&self) -> HoursBand {
        match self {
            Self::AroundTheClock => HoursBand::AroundTheClock,
            Self::Schedule(schedule)
                if EXTENDED_HOUR_PATTERNS
                    .iter()
                    .any(|pattern| schedule.contains(pattern)) =>
            {
                HoursBand::Extended
            }
            Self::Schedule(_) | Self::Unknown => HoursBand::Standard,
        }
    }

    /// Office-hours-only schedules flagged by the compliance checklist.
    pub fn is_limited(&self) -> bool {
        matches!(self, Self::Schedule(schedule) if LIMITED_HOUR_SCHEDULES.contains(&schedule.as_str()))
    }
}

impl From<Option<String>> for ManagementHours {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<ManagementHours> for Option<String> {
    fn from(value: ManagementHours) -> Self {
        match value {
            ManagementHours::AroundTheClock => Some("24/7".to_string()),
            ManagementHours::Schedule(schedule) => Some(schedule),
            ManagementHours::Unknown => None,
        }
    }
}

/// Canonical housing unit consumed by every scoring computation.
///
/// Optional attributes default to the conservative case: a missing flag means
/// the feature is absent, a missing distance or travel time falls into the
/// worst band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    #[serde(default, alias = "name")]
    pub title: String,
    #[serde(default, alias = "addr")]
    pub address: Option<String>,
    pub rent: f64,
    #[serde(alias = "avg_utils")]
    pub utilities: f64,
    #[serde(alias = "deposits")]
    pub deposit: f64,
    #[serde(default, alias = "incl_utils")]
    pub utilities_included: bool,
    #[serde(default)]
    pub bedrooms: u8,
    #[serde(default)]
    pub bathrooms: u8,

    #[serde(default, alias = "distance_to_campus", alias = "dist_to_campus_km")]
    pub distance_to_campus_km: Option<f64>,
    #[serde(default, alias = "walk_time", alias = "walk_min")]
    pub walk_minutes: Option<f64>,
    #[serde(default, alias = "bus_frequency", alias = "bus_headway_min")]
    pub bus_headway_minutes: Option<f64>,

    #[serde(default, alias = "step_free")]
    pub step_free_entry: bool,
    #[serde(default)]
    pub elevator: bool,
    #[serde(default)]
    pub doorway_width: Option<DoorwayWidth>,
    #[serde(default, alias = "acc_bath")]
    pub accessible_bathroom: bool,
    #[serde(default, alias = "acc_parking")]
    pub accessible_parking: bool,

    #[serde(default)]
    pub accepts_international: bool,
    #[serde(default, alias = "no_ssn_ok")]
    pub no_ssn_required: bool,
    #[serde(default, alias = "allows_cosigner", alias = "cosigner_ok")]
    pub cosigner_allowed: bool,
    #[serde(default, alias = "anti_disc_policy")]
    pub anti_discrimination_policy: bool,
    #[serde(default, alias = "responsive_comms")]
    pub responsive_communications: bool,

    #[serde(default, alias = "lit_streets", alias = "well_lit")]
    pub well_lit_streets: bool,
    #[serde(default, alias = "mgmt_hours_late")]
    pub management_hours: ManagementHours,
    #[serde(default)]
    pub neighborhood_safety_score: Option<f64>,

    #[serde(default)]
    pub pet_friendly: bool,
    #[serde(default)]
    pub smoking_allowed: bool,
}

impl Listing {
    /// Bare listing with only the required cost fields populated.
    pub fn new(id: impl Into<String>, rent: f64, utilities: f64, deposit: f64) -> Self {
        let id = id.into();
        Self {
            title: format!("Listing {id}"),
            id: ListingId(id),
            address: None,
            rent,
            utilities,
            deposit,
            utilities_included: false,
            bedrooms: 0,
            bathrooms: 0,
            distance_to_campus_km: None,
            walk_minutes: None,
            bus_headway_minutes: None,
            step_free_entry: false,
            elevator: false,
            doorway_width: None,
            accessible_bathroom: false,
            accessible_parking: false,
            accepts_international: false,
            no_ssn_required: false,
            cosigner_allowed: false,
            anti_discrimination_policy: false,
            responsive_communications: false,
            well_lit_streets: false,
            management_hours: ManagementHours::Unknown,
            neighborhood_safety_score: None,
            pet_friendly: false,
            smoking_allowed: false,
        }
    }

    /// Rent plus utilities plus the deposit amortized over twelve months.
    pub fn total_monthly_cost(&self) -> f64 {
        self.rent + self.utilities + self.deposit / 12.0
    }

    pub fn doorway_inches(&self) -> Option<f64> {
        self.doorway_width.map(DoorwayWidth::inches)
    }

    /// Reject listings whose numeric fields would corrupt downstream arithmetic.
    pub fn validate(&self) -> Result<(), PreconditionViolation> {
        ensure_amount("rent", self.rent)?;
        ensure_amount("utilities", self.utilities)?;
        ensure_amount("deposit", self.deposit)?;

        if let Some(width) = self.doorway_width {
            ensure_amount("doorway_width", width.raw())?;
        }
        if let Some(safety) = self.neighborhood_safety_score {
            ensure_amount("neighborhood_safety_score", safety)?;
        }
        for (field, value) in [
            ("distance_to_campus_km", self.distance_to_campus_km),
            ("walk_minutes", self.walk_minutes),
            ("bus_headway_minutes", self.bus_headway_minutes),
        ] {
            if let Some(value) = value {
                ensure_amount(field, value)?;
            }
        }

        Ok(())
    }
}

fn ensure_amount(field: &'static str, value: f64) -> Result<(), PreconditionViolation> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PreconditionViolation::InvalidAmount { field, value })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommutePreferences {
    #[serde(alias = "max_walk_time")]
    pub max_walk_minutes: f64,
    #[serde(alias = "max_bus_frequency", alias = "max_bus_time")]
    pub max_bus_wait_minutes: f64,
    pub winter_penalty: bool,
}

impl Default for CommutePreferences {
    fn default() -> Self {
        Self {
            max_walk_minutes: 20.0,
            max_bus_wait_minutes: 15.0,
            winter_penalty: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusivityNeeds {
    #[serde(default)]
    pub international_student: bool,
    #[serde(default, alias = "no_ssn")]
    pub needs_no_ssn: bool,
    #[serde(default)]
    pub needs_cosigner: bool,
}

/// Searcher constraints. `budget` is the denominator of every ratio and must
/// be positive; call [`UserPreferences::validate`] before any arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub budget: f64,
    #[serde(default)]
    pub max_rent: f64,
    #[serde(default)]
    pub bedrooms: u8,
    #[serde(default)]
    pub bathrooms: u8,
    #[serde(default)]
    pub accessibility_needs: Vec<String>,
    #[serde(default, alias = "commute_preferences")]
    pub commute: CommutePreferences,
    #[serde(default, alias = "inclusivity_needs")]
    pub inclusivity: InclusivityNeeds,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub pet_friendly: bool,
    #[serde(default)]
    pub smoking_allowed: bool,
}

fn default_language() -> String {
    "en".to_string()
}

impl UserPreferences {
    /// Preferences used when a caller supplies nothing but a budget.
    pub fn with_budget(budget: f64) -> Self {
        Self {
            budget,
            max_rent: budget * 0.75,
            bedrooms: 1,
            bathrooms: 1,
            accessibility_needs: Vec::new(),
            commute: CommutePreferences::default(),
            inclusivity: InclusivityNeeds::default(),
            language: default_language(),
            pet_friendly: false,
            smoking_allowed: false,
        }
    }

    pub fn validate(&self) -> Result<(), PreconditionViolation> {
        validate_budget(self.budget)
    }
}

pub(crate) fn validate_budget(budget: f64) -> Result<(), PreconditionViolation> {
    if budget.is_finite() && budget > 0.0 {
        Ok(())
    } else {
        Err(PreconditionViolation::NonPositiveBudget(budget))
    }
}

/// Input that would make a scoring computation meaningless.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreconditionViolation {
    #[error("budget must be greater than zero (found {0})")]
    NonPositiveBudget(f64),
    #[error("{field} must be a finite, non-negative number (found {value})")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doorway_width_converts_centimeters() {
        let width = DoorwayWidth::Centimeters(91.44);
        assert!((width.inches() - 36.0).abs() < 1e-9);
        assert_eq!(DoorwayWidth::Inches(32.0).inches(), 32.0);
    }

    #[test]
    fn management_hours_bands_schedules() {
        assert_eq!(ManagementHours::parse("24/7").band(), HoursBand::AroundTheClock);
        assert_eq!(ManagementHours::parse("8-22").band(), HoursBand::Extended);
        assert_eq!(ManagementHours::parse("Mon-Fri 9-19").band(), HoursBand::Extended);
        assert_eq!(ManagementHours::parse("9-17").band(), HoursBand::Standard);
        assert_eq!(ManagementHours::parse("  ").band(), HoursBand::Standard);
        assert!(ManagementHours::parse("9-18").is_limited());
        assert!(!ManagementHours::parse("Mon-Fri 9-17").is_limited());
    }

    #[test]
    fn management_hours_round_trip_as_plain_strings() {
        let json = serde_json::to_string(&ManagementHours::AroundTheClock).expect("serialize");
        assert_eq!(json, "\"24/7\"");
        let parsed: ManagementHours = serde_json::from_str("null").expect("deserialize");
        assert_eq!(parsed, ManagementHours::Unknown);
    }

    #[test]
    fn listing_validation_rejects_negative_and_nan_amounts() {
        let mut listing = Listing::new("1", 900.0, 100.0, 0.0);
        assert!(listing.validate().is_ok());

        listing.utilities = -5.0;
        assert_eq!(
            listing.validate(),
            Err(PreconditionViolation::InvalidAmount {
                field: "utilities",
                value: -5.0
            })
        );

        listing.utilities = 100.0;
        listing.rent = f64::NAN;
        assert!(matches!(
            listing.validate(),
            Err(PreconditionViolation::InvalidAmount { field: "rent", .. })
        ));

        listing.rent = 900.0;
        listing.doorway_width = Some(DoorwayWidth::Inches(-5.0));
        assert_eq!(
            listing.validate(),
            Err(PreconditionViolation::InvalidAmount {
                field: "doorway_width",
                value: -5.0
            })
        );

        listing.doorway_width = Some(DoorwayWidth::Centimeters(86.0));
        listing.neighborhood_safety_score = Some(-1.0);
        assert_eq!(
            listing.validate(),
            Err(PreconditionViolation::InvalidAmount {
                field: "neighborhood_safety_score",
                value: -1.0
            })
        );
    }

    #[test]
    fn legacy_field_names_deserialize() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "id": "old-1",
                "name": "Legacy Flat",
                "addr": "1 Main St",
                "rent": 900,
                "avg_utils": 80,
                "deposits": 900,
                "incl_utils": false,
                "distance_to_campus": 1.5,
                "walk_time": 12,
                "bus_frequency": 10,
                "step_free": true,
                "doorway_width": 34,
                "acc_bath": true,
                "no_ssn_ok": true,
                "allows_cosigner": true,
                "anti_disc_policy": true,
                "responsive_comms": true,
                "lit_streets": true
            }"#,
        )
        .expect("legacy listing deserializes");

        assert_eq!(listing.title, "Legacy Flat");
        assert_eq!(listing.address.as_deref(), Some("1 Main St"));
        assert_eq!(listing.utilities, 80.0);
        assert_eq!(listing.deposit, 900.0);
        assert_eq!(listing.distance_to_campus_km, Some(1.5));
        assert_eq!(listing.walk_minutes, Some(12.0));
        assert_eq!(listing.bus_headway_minutes, Some(10.0));
        assert_eq!(listing.doorway_width, Some(DoorwayWidth::Inches(34.0)));
        assert!(listing.step_free_entry && listing.accessible_bathroom);
        assert!(listing.no_ssn_required && listing.cosigner_allowed);
        assert!(listing.anti_discrimination_policy && listing.responsive_communications);
        assert!(listing.well_lit_streets);

        let preferences: UserPreferences = serde_json::from_str(
            r#"{
                "budget": 1200,
                "commute_preferences": { "max_walk_time": 15, "winter_penalty": true },
                "inclusivity_needs": { "no_ssn": true }
            }"#,
        )
        .expect("legacy preferences deserialize");

        assert_eq!(preferences.commute.max_walk_minutes, 15.0);
        assert_eq!(preferences.commute.max_bus_wait_minutes, 15.0);
        assert!(preferences.commute.winter_penalty);
        assert!(preferences.inclusivity.needs_no_ssn);
    }

    #[test]
    fn budget_validation_rejects_zero_and_infinite() {
        assert!(validate_budget(1.0).is_ok());
        assert_eq!(
            validate_budget(0.0),
            Err(PreconditionViolation::NonPositiveBudget(0.0))
        );
        assert!(validate_budget(f64::INFINITY).is_err());
    }

    #[test]
    fn listing_json_defaults_optional_flags() {
        let listing: Listing = serde_json::from_str(
            r#"{"id":"7","rent":800,"utilities":90,"deposit":800,"management_hours":"24/7"}"#,
        )
        .expect("minimal listing parses");
        assert!(!listing.elevator);
        assert_eq!(listing.management_hours, ManagementHours::AroundTheClock);
        assert_eq!(listing.walk_minutes, None);
    }
}
