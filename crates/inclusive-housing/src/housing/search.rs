//! Catalog search: filter, score, sort and paginate listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Listing, PreconditionViolation, UserPreferences};
use super::scoring::{score_listings, ScoredListing};

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    DiScore,
    Rent,
    Distance,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Every bound is optional; an empty filter keeps the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingFilter {
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    pub min_bedrooms: Option<u8>,
    pub min_bathrooms: Option<u8>,
    pub pet_friendly: Option<bool>,
    pub smoking_allowed: Option<bool>,
    pub max_distance_km: Option<f64>,
    pub min_di_score: Option<f64>,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl ListingFilter {
    /// Attribute checks only; `min_di_score` needs a score and is applied later.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.min_rent.map_or(true, |min| listing.rent >= min)
            && self.max_rent.map_or(true, |max| listing.rent <= max)
            && self
                .min_bedrooms
                .map_or(true, |min| listing.bedrooms >= min)
            && self
                .min_bathrooms
                .map_or(true, |min| listing.bathrooms >= min)
            && self
                .pet_friendly
                .map_or(true, |wanted| listing.pet_friendly == wanted)
            && self
                .smoking_allowed
                .map_or(true, |wanted| listing.smoking_allowed == wanted)
            && self.max_distance_km.map_or(true, |max| {
                listing
                    .distance_to_campus_km
                    .is_some_and(|km| km <= max)
            })
    }

    fn compare(&self, a: &ScoredListing, b: &ScoredListing) -> Ordering {
        let ordering = match self.sort_by {
            SortKey::DiScore => a.di_score.overall.total_cmp(&b.di_score.overall),
            SortKey::Rent => a.listing.rent.total_cmp(&b.listing.rent),
            SortKey::Title => a.listing.title.cmp(&b.listing.title),
            SortKey::Distance => {
                match (a.listing.distance_to_campus_km, b.listing.distance_to_campus_km) {
                    (Some(left), Some(right)) => left.total_cmp(&right),
                    // Unknown distances trail in either direction.
                    (Some(_), None) => return Ordering::Less,
                    (None, Some(_)) => return Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        };

        match self.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// 1-based.
    pub page: usize,
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }.normalized()
    }

    /// Page 0 is read as page 1 and the limit is kept within `1..=MAX_PAGE_LIMIT`.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

pub fn search_listings(
    catalog: &[Listing],
    filter: &ListingFilter,
    preferences: &UserPreferences,
    page: PageRequest,
) -> Result<Page<ScoredListing>, PreconditionViolation> {
    preferences.validate()?;
    let page = page.normalized();

    let candidates: Vec<Listing> = catalog
        .iter()
        .filter(|listing| filter.matches(listing))
        .cloned()
        .collect();

    let mut scored = score_listings(&candidates, preferences)?;
    if let Some(min_score) = filter.min_di_score {
        scored.retain(|entry| entry.di_score.overall >= min_score);
    }
    scored.sort_by(|a, b| filter.compare(a, b));

    let total = scored.len();
    let total_pages = total.div_ceil(page.limit);
    let data: Vec<ScoredListing> = scored
        .into_iter()
        .skip(page.offset())
        .take(page.limit)
        .collect();

    debug!(
        catalog = catalog.len(),
        matched = total,
        page = page.page,
        returned = data.len(),
        "searched listing catalog"
    );

    Ok(Page {
        data,
        page: page.page,
        limit: page.limit,
        total,
        total_pages,
    })
}
