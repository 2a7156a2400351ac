use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use salesdesk_core::deals::deals_model::{Deal, EnrichedDeal, ImportSummary, NewDeal};
use salesdesk_core::deals::deals_service::enrich_deals;
use salesdesk_core::deals::deals_traits::DealServiceTrait;
use salesdesk_core::errors::Error as CoreError;

use crate::api::shared::trigger_closure_type_reconciliation;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn get_deals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Deal>>> {
    let deals = state.deal_service.get_closed_deals()?;
    Ok(Json(deals))
}

async fn get_enriched_deals(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<EnrichedDeal>>> {
    let deals = state.deal_service.get_closed_deals()?;
    let enriched = enrich_deals(
        deals,
        Arc::clone(&state.user_repository),
        &state.user_cache,
    )
    .await;
    Ok(Json(enriched))
}

async fn create_deal(
    State(state): State<Arc<AppState>>,
    Json(new_deal): Json<NewDeal>,
) -> ApiResult<Json<Deal>> {
    let deal = state.deal_service.create_deal(new_deal).await?;
    trigger_closure_type_reconciliation(state.clone());
    Ok(Json(deal))
}

async fn update_deal(
    State(state): State<Arc<AppState>>,
    Json(deal): Json<Deal>,
) -> ApiResult<Json<Deal>> {
    let deal = state.deal_service.update_deal(deal).await?;
    trigger_closure_type_reconciliation(state.clone());
    Ok(Json(deal))
}

async fn delete_deal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    let _ = state.deal_service.delete_deal(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body is the CSV text itself (text/csv), matching the export layout.
async fn import_deals(
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<Json<ImportSummary>> {
    let summary = state.deal_service.import_csv(body.as_bytes()).await?;
    trigger_closure_type_reconciliation(state.clone());
    Ok(Json(summary))
}

async fn export_deals(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let mut buffer = Vec::new();
    state.deal_service.export_csv(&mut buffer)?;
    let text = String::from_utf8(buffer)
        .map_err(|e| CoreError::Unexpected(format!("export produced invalid UTF-8: {}", e)))?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], text))
}

async fn reconcile_closure_types(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<serde_json::Value>> {
    let corrected = state.deal_service.reconcile_closure_types().await?;
    Ok(Json(serde_json::json!({ "corrected": corrected })))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/deals", get(get_deals).post(create_deal).put(update_deal))
        .route("/deals/enriched", get(get_enriched_deals))
        .route("/deals/import", post(import_deals))
        .route("/deals/export", get(export_deals))
        .route(
            "/deals/reconcile-closure-types",
            post(reconcile_closure_types),
        )
        .route("/deals/{id}", delete(delete_deal))
}
