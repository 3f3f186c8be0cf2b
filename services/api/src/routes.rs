use crate::infra::{AppState, ListingCatalog};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Local, Utc};
use inclusive_housing::error::AppError;
use inclusive_housing::housing::budget::{
    budget_timeline, savings_potential, SavingsPotential, TimelineMonth,
};
use inclusive_housing::housing::compliance::{
    accessibility_violations, discrimination_risks, mitigation_strategies, render_report,
};
use inclusive_housing::housing::{
    analyze_budget, assess_compliance, compare_listings, score_listing, score_listings,
    search_listings, BudgetAnalysis, ComplianceCheck, DiScore, Listing, ListingComparison,
    ListingFilter, ListingId, Page, PageRequest, PreconditionViolation, ScoredListing,
    UserPreferences,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

const DEFAULT_TIMELINE_MONTHS: u32 = 12;
/// Required listing keys with the legacy names `Listing` also accepts.
const REQUIRED_LISTING_FIELDS: [(&str, &[&str]); 4] = [
    ("id", &[]),
    ("rent", &[]),
    ("utilities", &["avg_utils"]),
    ("deposit", &["deposits"]),
];

/// Success envelope for `/api/v1`; failures render through [`AppError`].
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T> {
    pub(crate) success: bool,
    pub(crate) data: T,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    pub(crate) listing: Value,
    #[serde(rename = "userPreferences", alias = "user_preferences")]
    pub(crate) user_preferences: UserPreferences,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreData {
    pub(crate) listing_id: ListingId,
    pub(crate) di_score: DiScore,
    pub(crate) timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BudgetRequest {
    pub(crate) listing: Value,
    #[serde(rename = "userPreferences", alias = "user_preferences")]
    pub(crate) user_preferences: UserPreferences,
    #[serde(default)]
    pub(crate) savings_goal: Option<f64>,
    #[serde(default)]
    pub(crate) timeline_months: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BudgetReport {
    pub(crate) analysis: BudgetAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) savings: Option<SavingsPotential>,
    pub(crate) timeline: Vec<TimelineMonth>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComplianceRequest {
    pub(crate) listing: Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct ComplianceReport {
    pub(crate) check: ComplianceCheck,
    pub(crate) violations: Vec<String>,
    pub(crate) risks: Vec<String>,
    pub(crate) strategies: Vec<String>,
    pub(crate) report: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum AnalysisType {
    #[default]
    Full,
    Quick,
    Compare,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    pub(crate) listing: Value,
    #[serde(rename = "userPreferences", alias = "user_preferences")]
    pub(crate) user_preferences: UserPreferences,
    #[serde(default, alias = "analysisType")]
    pub(crate) analysis_type: AnalysisType,
    #[serde(default)]
    pub(crate) listings: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "analysis_type", rename_all = "snake_case")]
pub(crate) enum AnalysisData {
    Full {
        di_score: DiScore,
        budget: BudgetAnalysis,
        compliance: ComplianceCheck,
    },
    Quick {
        di_score: DiScore,
    },
    Compare {
        comparisons: Vec<ListingComparison>,
    },
}

#[derive(Debug, Deserialize)]
pub(crate) struct RankRequest {
    pub(crate) listings: Vec<Value>,
    #[serde(rename = "userPreferences", alias = "user_preferences")]
    pub(crate) user_preferences: UserPreferences,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct BudgetQuery {
    pub(crate) budget: Option<f64>,
}

/// Scoring endpoints backed by a shared, read-only listing catalog.
pub(crate) fn housing_router(catalog: Arc<ListingCatalog>) -> Router {
    Router::new()
        .route("/api/v1/score", post(score_endpoint))
        .route("/api/v1/budget", post(budget_endpoint))
        .route("/api/v1/compliance", post(compliance_endpoint))
        .route("/api/v1/analyze", post(analyze_endpoint))
        .route("/api/v1/listings/rank", post(rank_endpoint))
        .route("/api/v1/listings", get(search_endpoint))
        .with_state(catalog)
}

pub(crate) fn with_housing_routes(catalog: Arc<ListingCatalog>) -> Router {
    housing_router(catalog)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> ApiResult<ScoreData> {
    let request = body(payload)?;
    let listing = parse_listing(request.listing)?;
    let di_score = score_listing(&listing, &request.user_preferences)?;

    debug!(listing = %listing.id, overall = di_score.overall, "scored listing");

    Ok(ApiResponse::ok(ScoreData {
        listing_id: listing.id,
        di_score,
        timestamp: Utc::now(),
    }))
}

pub(crate) async fn budget_endpoint(
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> ApiResult<BudgetReport> {
    let request = body(payload)?;
    let listing = parse_listing(request.listing)?;
    let preferences = request.user_preferences;

    let analysis = analyze_budget(&listing, &preferences)?;
    let savings = request
        .savings_goal
        .map(|goal| savings_potential(&listing, preferences.budget, goal))
        .transpose()?;
    let months = request.timeline_months.unwrap_or(DEFAULT_TIMELINE_MONTHS);

    Ok(ApiResponse::ok(BudgetReport {
        analysis,
        savings,
        timeline: budget_timeline(&listing, months),
    }))
}

pub(crate) async fn compliance_endpoint(
    payload: Result<Json<ComplianceRequest>, JsonRejection>,
) -> ApiResult<ComplianceReport> {
    let request = body(payload)?;
    let listing = parse_listing(request.listing)?;

    let check = assess_compliance(&listing);
    let report = render_report(&listing, &check, Local::now().date_naive());

    Ok(ApiResponse::ok(ComplianceReport {
        violations: accessibility_violations(&listing),
        risks: discrimination_risks(&listing),
        strategies: mitigation_strategies(&check),
        check,
        report,
    }))
}

pub(crate) async fn analyze_endpoint(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<AnalysisData> {
    let request = body(payload)?;
    let listing = parse_listing(request.listing)?;
    let preferences = request.user_preferences;

    let data = match request.analysis_type {
        AnalysisType::Full => AnalysisData::Full {
            di_score: score_listing(&listing, &preferences)?,
            budget: analyze_budget(&listing, &preferences)?,
            compliance: assess_compliance(&listing),
        },
        AnalysisType::Quick => AnalysisData::Quick {
            di_score: score_listing(&listing, &preferences)?,
        },
        AnalysisType::Compare => {
            let mut candidates = vec![listing];
            candidates.extend(parse_listings(request.listings)?);
            AnalysisData::Compare {
                comparisons: compare_listings(&candidates, &preferences)?,
            }
        }
    };

    Ok(ApiResponse::ok(data))
}

pub(crate) async fn rank_endpoint(
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> ApiResult<Vec<ScoredListing>> {
    let request = body(payload)?;
    let listings = parse_listings(request.listings)?;
    let ranked = score_listings(&listings, &request.user_preferences)?;

    info!(listings = ranked.len(), "ranked submitted listings");
    Ok(ApiResponse::ok(ranked))
}

pub(crate) async fn search_endpoint(
    State(catalog): State<Arc<ListingCatalog>>,
    filter: Result<Query<ListingFilter>, QueryRejection>,
    page: Result<Query<PageRequest>, QueryRejection>,
    budget: Result<Query<BudgetQuery>, QueryRejection>,
) -> ApiResult<Page<ScoredListing>> {
    let filter = query(filter)?;
    let page = query(page)?;
    let preferences = match query(budget)?.budget {
        Some(budget) => UserPreferences::with_budget(budget),
        None => catalog.default_preferences(),
    };

    let results = search_listings(&catalog.listings, &filter, &preferences, page)?;
    Ok(ApiResponse::ok(results))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Required cost fields are checked by name before serde sees the document, so
/// a missing amount reads as a precondition failure rather than a parse error.
fn parse_listing(value: Value) -> Result<Listing, AppError> {
    let object = value
        .as_object()
        .ok_or_else(|| AppError::BadRequest("listing must be a JSON object".to_string()))?;

    let present = |key: &str| object.get(key).is_some_and(|value| !value.is_null());
    if let Some((field, _)) = REQUIRED_LISTING_FIELDS
        .into_iter()
        .find(|(field, aliases)| !present(*field) && !aliases.iter().any(|alias| present(*alias)))
    {
        return Err(PreconditionViolation::MissingField(field).into());
    }

    let listing: Listing = serde_json::from_value(value)
        .map_err(|err| AppError::BadRequest(format!("invalid listing: {err}")))?;
    listing.validate()?;
    Ok(listing)
}

fn parse_listings(values: Vec<Value>) -> Result<Vec<Listing>, AppError> {
    values.into_iter().map(parse_listing).collect()
}
