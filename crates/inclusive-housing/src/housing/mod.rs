//! Housing suitability engine: listing model, D&I scoring, budget planning,
//! compliance assessment, catalog search and CSV import.

pub mod budget;
pub mod compliance;
pub mod domain;
pub mod import;
pub mod scoring;
pub mod search;

#[cfg(test)]
mod tests;

pub use budget::{analyze_budget, compare_listings, BudgetAnalysis, ListingComparison};
pub use compliance::{assess_compliance, ComplianceCheck, RiskLevel};
pub use domain::{
    CommutePreferences, DoorwayWidth, InclusivityNeeds, Listing, ListingId, ManagementHours,
    PreconditionViolation, UserPreferences,
};
pub use import::{ImportError, ListingImporter};
pub use scoring::{score_listing, score_listings, DiScore, ScoredListing, Tier, DI_WEIGHTS};
pub use search::{search_listings, ListingFilter, Page, PageRequest, SortKey, SortOrder};
