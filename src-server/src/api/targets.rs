use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use salesdesk_core::fiscal::{FinancialYear, Quarter};
use salesdesk_core::targets::targets_model::{NewSalesTarget, SalesTarget};
use salesdesk_core::targets::targets_service::parse_target_amount;
use salesdesk_core::targets::targets_traits::TargetServiceTrait;

use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetsQuery {
    financial_year: Option<String>,
}

/// Amounts arrive as strings so a bad edit comes back as a field-level
/// validation error instead of a deserialization failure.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuarterTargetRequest {
    financial_year: String,
    quarter: String,
    assigned_to_uid: String,
    target_amount: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnualTargetRequest {
    financial_year: String,
    assigned_to_uid: String,
    annual_amount: String,
}

async fn get_targets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TargetsQuery>,
) -> ApiResult<Json<Vec<SalesTarget>>> {
    let targets = match query.financial_year.as_deref() {
        Some(label) => {
            let fy = FinancialYear::parse(label)?;
            state.target_service.get_targets_for_year(&fy)?
        }
        None => state.target_service.get_targets()?,
    };
    Ok(Json(targets))
}

async fn set_quarter_target(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuarterTargetRequest>,
) -> ApiResult<Json<SalesTarget>> {
    let new_target = NewSalesTarget {
        financial_year: FinancialYear::parse(&request.financial_year)?,
        quarter: Quarter::parse(&request.quarter)?,
        assigned_to_uid: request.assigned_to_uid,
        target_amount: parse_target_amount(&request.target_amount)?,
    };
    let target = state.target_service.set_quarter_target(new_target).await?;
    Ok(Json(target))
}

/// Splits an annual figure across the four quarters and persists one row per
/// quarter.
async fn set_annual_target(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnnualTargetRequest>,
) -> ApiResult<Json<Vec<SalesTarget>>> {
    let financial_year = FinancialYear::parse(&request.financial_year)?;
    let annual_amount = parse_target_amount(&request.annual_amount)?;
    let rows = state
        .target_service
        .set_annual_target(request.assigned_to_uid, financial_year, annual_amount)
        .await?;
    Ok(Json(rows))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/targets", get(get_targets).post(set_quarter_target))
        .route("/targets/annual", post(set_annual_target))
}
