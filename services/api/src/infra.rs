use chrono::NaiveDate;
use inclusive_housing::config::DataConfig;
use inclusive_housing::error::AppError;
use inclusive_housing::housing::{
    DoorwayWidth, Listing, ListingImporter, ManagementHours, UserPreferences,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only listing set served by `GET /api/v1/listings`.
#[derive(Debug, Clone)]
pub(crate) struct ListingCatalog {
    pub(crate) listings: Vec<Listing>,
    pub(crate) default_budget: f64,
}

impl ListingCatalog {
    pub(crate) fn new(listings: Vec<Listing>, default_budget: f64) -> Self {
        Self {
            listings,
            default_budget,
        }
    }

    /// Imports the configured CSV, or falls back to the bundled sample listings.
    pub(crate) fn load(config: &DataConfig) -> Result<Self, AppError> {
        let listings = match &config.listings_csv {
            Some(path) => ListingImporter::from_path(path)?,
            None => {
                info!("no listing CSV configured; serving sample catalog");
                sample_listings()
            }
        };

        Ok(Self::new(listings, config.default_budget))
    }

    pub(crate) fn default_preferences(&self) -> UserPreferences {
        UserPreferences::with_budget(self.default_budget)
    }
}

pub(crate) fn sample_listings() -> Vec<Listing> {
    let mut commons = Listing::new("vt-101", 1300.0, 150.0, 1200.0);
    commons.title = "Maple Commons 2B".to_string();
    commons.address = Some("401 College Ave, Blacksburg, VA".to_string());
    commons.bedrooms = 2;
    commons.bathrooms = 1;
    commons.distance_to_campus_km = Some(0.4);
    commons.walk_minutes = Some(8.0);
    commons.bus_headway_minutes = Some(10.0);
    commons.step_free_entry = true;
    commons.elevator = true;
    commons.doorway_width = Some(DoorwayWidth::Inches(36.0));
    commons.accessible_bathroom = true;
    commons.accessible_parking = true;
    commons.accepts_international = true;
    commons.no_ssn_required = true;
    commons.cosigner_allowed = true;
    commons.anti_discrimination_policy = true;
    commons.responsive_communications = true;
    commons.well_lit_streets = true;
    commons.management_hours = ManagementHours::AroundTheClock;
    commons.neighborhood_safety_score = Some(85.0);

    let mut terrace = Listing::new("vt-102", 850.0, 90.0, 850.0);
    terrace.title = "Progress Street Terrace".to_string();
    terrace.address = Some("215 Progress St NW, Blacksburg, VA".to_string());
    terrace.bedrooms = 1;
    terrace.bathrooms = 1;
    terrace.utilities_included = true;
    terrace.distance_to_campus_km = Some(1.2);
    terrace.walk_minutes = Some(16.0);
    terrace.bus_headway_minutes = Some(15.0);
    terrace.step_free_entry = true;
    terrace.doorway_width = Some(DoorwayWidth::Centimeters(86.0));
    terrace.accepts_international = true;
    terrace.cosigner_allowed = true;
    terrace.responsive_communications = true;
    terrace.well_lit_streets = true;
    terrace.management_hours = ManagementHours::parse("8-22");
    terrace.neighborhood_safety_score = Some(72.0);
    terrace.pet_friendly = true;

    let mut ridge = Listing::new("vt-103", 1750.0, 200.0, 3500.0);
    ridge.title = "Hethwood Ridge 3B".to_string();
    ridge.address = Some("1800 Hethwood Blvd, Blacksburg, VA".to_string());
    ridge.bedrooms = 3;
    ridge.bathrooms = 2;
    ridge.distance_to_campus_km = Some(3.5);
    ridge.walk_minutes = Some(40.0);
    ridge.bus_headway_minutes = Some(25.0);
    ridge.accessible_parking = true;
    ridge.doorway_width = Some(DoorwayWidth::Inches(30.0));
    ridge.anti_discrimination_policy = true;
    ridge.management_hours = ManagementHours::parse("9-17");
    ridge.neighborhood_safety_score = Some(90.0);
    ridge.pet_friendly = true;
    ridge.smoking_allowed = true;

    let mut loft = Listing::new("vt-104", 980.0, 120.0, 980.0);
    loft.title = "Main Street Loft".to_string();
    loft.address = Some("120 N Main St, Blacksburg, VA".to_string());
    loft.bedrooms = 1;
    loft.bathrooms = 1;
    loft.distance_to_campus_km = Some(0.8);
    loft.walk_minutes = Some(11.0);
    loft.bus_headway_minutes = Some(8.0);
    loft.elevator = true;
    loft.accessible_bathroom = true;
    loft.no_ssn_required = true;
    loft.anti_discrimination_policy = true;
    loft.responsive_communications = true;
    loft.management_hours = ManagementHours::parse("9-18");

    vec![commons, terrace, ridge, loft]
}

/// Single listing stored as a JSON document, the same shape the HTTP API accepts.
pub(crate) fn read_listing_json(path: &Path) -> Result<Listing, AppError> {
    let file = std::fs::File::open(path)?;
    let listing: Listing = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(std::io::Error::from)?;
    listing.validate()?;
    Ok(listing)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inclusive_housing::housing::PreconditionViolation;

    #[test]
    fn sample_catalog_is_valid() {
        let listings = sample_listings();
        assert_eq!(listings.len(), 4);
        assert!(listings.iter().all(|listing| listing.validate().is_ok()));
    }

    #[test]
    fn catalog_falls_back_to_samples() {
        let config = DataConfig {
            listings_csv: None,
            default_budget: 1800.0,
        };
        let catalog = ListingCatalog::load(&config).expect("catalog loads");
        assert_eq!(catalog.listings.len(), 4);
        assert_eq!(catalog.default_preferences().budget, 1800.0);
    }

    fn write_listing(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "inclusive-housing-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, body).expect("write listing fixture");
        path
    }

    #[test]
    fn listing_json_is_read_and_validated() {
        let path = write_listing(
            "valid",
            r#"{"id":"j-1","rent":900,"utilities":100,"deposit":900,"doorway_width":34}"#,
        );
        let listing = read_listing_json(&path).expect("listing loads");
        std::fs::remove_file(&path).ok();
        assert_eq!(listing.doorway_width, Some(DoorwayWidth::Inches(34.0)));

        let path = write_listing(
            "negative-doorway",
            r#"{"id":"j-2","rent":900,"utilities":100,"deposit":900,"doorway_width":{"inches":-5}}"#,
        );
        let result = read_listing_json(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(
            result,
            Err(AppError::Precondition(PreconditionViolation::InvalidAmount {
                field: "doorway_width",
                ..
            }))
        ));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert_eq!(
            parse_date("2025-09-24"),
            Ok(NaiveDate::from_ymd_opt(2025, 9, 24).expect("valid date"))
        );
        assert!(parse_date("09/24/2025").is_err());
    }
}
