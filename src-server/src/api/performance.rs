//! Dashboard endpoints: carried-forward quota performance for a user or a
//! viewer's effective team.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use salesdesk_core::deals::deals_traits::DealServiceTrait;
use salesdesk_core::errors::Error as CoreError;
use salesdesk_core::quota::quota_model::{QuarterPerformance, TeamSelection, ViewScope};
use salesdesk_core::quota::QuotaAggregator;
use salesdesk_core::targets::targets_traits::TargetServiceTrait;
use salesdesk_core::users::users_traits::UserServiceTrait;

use crate::api::shared;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PerformanceResponse {
    adjusted_target: Decimal,
    achieved: Decimal,
    deficit: Decimal,
    achievement_percentage: u32,
}

impl From<QuarterPerformance> for PerformanceResponse {
    fn from(perf: QuarterPerformance) -> Self {
        PerformanceResponse {
            adjusted_target: perf.adjusted_target,
            achieved: perf.achieved,
            deficit: perf.deficit,
            achievement_percentage: perf.achievement_percentage(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PerformanceQuery {
    financial_year: Option<String>,
    /// "Q1".."Q4" or "all" (the default).
    quarter: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamPerformanceQuery {
    viewer_uid: String,
    financial_year: Option<String>,
    quarter: Option<String>,
    scope: Option<ViewScope>,
    /// Uid to drill into, or "all".
    team_user: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberPerformance {
    uid: String,
    name: Option<String>,
    performance: PerformanceResponse,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TeamPerformanceResponse {
    members: Vec<MemberPerformance>,
    combined: PerformanceResponse,
}

async fn user_performance(
    Path(uid): Path<String>,
    Query(query): Query<PerformanceQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PerformanceResponse>> {
    let financial_year = shared::resolve_financial_year(query.financial_year.as_deref())?;
    let selection = shared::parse_quarter_selection(query.quarter.as_deref())?;

    let deals = state.deal_service.get_closed_deals()?;
    let targets = state.target_service.get_targets_for_year(&financial_year)?;
    let directory = state.user_service.directory()?;

    let aggregator = QuotaAggregator::new(&deals, &targets, &directory);
    let performance =
        aggregator.quarter_target_with_carry_forward(&uid, &financial_year, selection);
    Ok(Json(performance.into()))
}

async fn team_performance(
    Query(query): Query<TeamPerformanceQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TeamPerformanceResponse>> {
    let financial_year = shared::resolve_financial_year(query.financial_year.as_deref())?;
    let selection = shared::parse_quarter_selection(query.quarter.as_deref())?;

    let deals = state.deal_service.get_closed_deals()?;
    let targets = state.target_service.get_targets_for_year(&financial_year)?;
    let directory = state.user_service.directory()?;

    let viewer = directory
        .get(&query.viewer_uid)
        .cloned()
        .ok_or_else(|| CoreError::NotFound(format!("User '{}'", query.viewer_uid)))?;

    let aggregator = QuotaAggregator::new(&deals, &targets, &directory);
    let scope = query.scope.unwrap_or(ViewScope::Team);
    let team_selection = TeamSelection::parse(query.team_user.as_deref());
    let uids = aggregator.resolve_effective_user_set(&viewer, scope, &team_selection);

    let members = uids
        .iter()
        .map(|uid| MemberPerformance {
            uid: uid.clone(),
            name: directory.get(uid).map(|u| u.name.clone()),
            performance: aggregator
                .quarter_target_with_carry_forward(uid, &financial_year, selection)
                .into(),
        })
        .collect();
    let combined = aggregator
        .combined_quarter_target(&uids, &financial_year, selection)
        .into();

    Ok(Json(TeamPerformanceResponse { members, combined }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/performance/team", get(team_performance))
        .route("/performance/{uid}", get(user_performance))
}
