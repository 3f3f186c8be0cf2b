use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One catalog row exactly as exported, every column optional text.
///
/// Header aliases cover the column names used by the legacy listing export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawListing {
    #[serde(deserialize_with = "empty_string_as_none")]
    pub id: Option<String>,
    #[serde(alias = "name", deserialize_with = "empty_string_as_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub address: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub rent: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub utilities: Option<String>,
    #[serde(alias = "deposits", deserialize_with = "empty_string_as_none")]
    pub deposit: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub utilities_included: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub bedrooms: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub bathrooms: Option<String>,

    #[serde(alias = "distance_to_campus", deserialize_with = "empty_string_as_none")]
    pub distance_to_campus_km: Option<String>,
    #[serde(alias = "walk_time", deserialize_with = "empty_string_as_none")]
    pub walk_minutes: Option<String>,
    #[serde(alias = "bus_frequency", deserialize_with = "empty_string_as_none")]
    pub bus_headway_minutes: Option<String>,

    #[serde(deserialize_with = "empty_string_as_none")]
    pub step_free_entry: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub elevator: Option<String>,
    #[serde(alias = "doorway_width", deserialize_with = "empty_string_as_none")]
    pub doorway_width_in: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub doorway_width_cm: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub accessible_bathroom: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub accessible_parking: Option<String>,

    #[serde(deserialize_with = "empty_string_as_none")]
    pub accepts_international: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub no_ssn_required: Option<String>,
    #[serde(alias = "allows_cosigner", deserialize_with = "empty_string_as_none")]
    pub cosigner_allowed: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub anti_discrimination_policy: Option<String>,
    #[serde(alias = "responsive_comms", deserialize_with = "empty_string_as_none")]
    pub responsive_communications: Option<String>,

    #[serde(alias = "lit_streets", deserialize_with = "empty_string_as_none")]
    pub well_lit_streets: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub management_hours: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub neighborhood_safety_score: Option<String>,

    #[serde(deserialize_with = "empty_string_as_none")]
    pub pet_friendly: Option<String>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub smoking_allowed: Option<String>,
}

/// Data rows in file order, numbered from 1 (the header is not counted).
pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<(usize, RawListing)>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<RawListing>()
        .enumerate()
        .map(|(index, record)| record.map(|raw| (index + 1, raw)))
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
