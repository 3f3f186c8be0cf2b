use super::parser::RawListing;
use super::ImportError;
use crate::housing::domain::{DoorwayWidth, Listing, ListingId, ManagementHours};

const DEFAULT_ROOM_COUNT: u8 = 1;

/// Turn a raw row into a canonical [`Listing`].
///
/// Required money fields fail loudly; optional measurements that cannot be
/// read are dropped to `None` so they score in the conservative band.
pub fn normalize(raw: RawListing) -> Result<Listing, ImportError> {
    let id = clean_text(raw.id).ok_or(ImportError::MissingField("id"))?;
    let rent = required_money("rent", raw.rent)?;
    let utilities = optional_money("utilities", raw.utilities)?;
    let deposit = optional_money("deposit", raw.deposit)?;

    let doorway_width = optional_number(raw.doorway_width_in.as_deref())
        .map(DoorwayWidth::Inches)
        .or_else(|| {
            optional_number(raw.doorway_width_cm.as_deref()).map(DoorwayWidth::Centimeters)
        });

    Ok(Listing {
        title: clean_text(raw.title).unwrap_or_else(|| format!("Listing {id}")),
        id: ListingId(id),
        address: clean_text(raw.address),
        rent,
        utilities,
        deposit,
        utilities_included: flag(raw.utilities_included.as_deref()),
        bedrooms: room_count(raw.bedrooms.as_deref()),
        bathrooms: room_count(raw.bathrooms.as_deref()),
        distance_to_campus_km: optional_number(raw.distance_to_campus_km.as_deref()),
        walk_minutes: optional_number(raw.walk_minutes.as_deref()),
        bus_headway_minutes: optional_number(raw.bus_headway_minutes.as_deref()),
        step_free_entry: flag(raw.step_free_entry.as_deref()),
        elevator: flag(raw.elevator.as_deref()),
        doorway_width,
        accessible_bathroom: flag(raw.accessible_bathroom.as_deref()),
        accessible_parking: flag(raw.accessible_parking.as_deref()),
        accepts_international: flag(raw.accepts_international.as_deref()),
        no_ssn_required: flag(raw.no_ssn_required.as_deref()),
        cosigner_allowed: flag(raw.cosigner_allowed.as_deref()),
        anti_discrimination_policy: flag(raw.anti_discrimination_policy.as_deref()),
        responsive_communications: flag(raw.responsive_communications.as_deref()),
        well_lit_streets: flag(raw.well_lit_streets.as_deref()),
        management_hours: raw
            .management_hours
            .as_deref()
            .map(ManagementHours::parse)
            .unwrap_or_default(),
        neighborhood_safety_score: optional_number(raw.neighborhood_safety_score.as_deref()),
        pet_friendly: flag(raw.pet_friendly.as_deref()),
        smoking_allowed: flag(raw.smoking_allowed.as_deref()),
    })
}

fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.replace(['\u{feff}', '\u{200b}'], "").trim().to_string())
        .filter(|text| !text.is_empty())
}

pub(crate) fn flag(value: Option<&str>) -> bool {
    value
        .map(|text| {
            matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "yes" | "1" | "y"
            )
        })
        .unwrap_or(false)
}

fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ','))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

fn required_money(field: &'static str, value: Option<String>) -> Result<f64, ImportError> {
    let text = value.ok_or(ImportError::MissingField(field))?;
    parse_amount(&text).ok_or(ImportError::InvalidNumber { field, value: text })
}

fn optional_money(field: &'static str, value: Option<String>) -> Result<f64, ImportError> {
    match value {
        Some(text) => parse_amount(&text).ok_or(ImportError::InvalidNumber { field, value: text }),
        None => Ok(0.0),
    }
}

fn optional_number(value: Option<&str>) -> Option<f64> {
    value.and_then(parse_amount)
}

fn room_count(value: Option<&str>) -> u8 {
    value
        .and_then(|text| text.trim().parse::<u8>().ok())
        .unwrap_or(DEFAULT_ROOM_COUNT)
}
