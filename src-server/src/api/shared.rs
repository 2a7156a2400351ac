use std::sync::Arc;

use salesdesk_core::fiscal::{FinancialYear, QuarterSelection};

use crate::error::ApiResult;
use crate::main_lib::AppState;

/// Missing query parameter means the financial year the clock is in now.
pub fn resolve_financial_year(raw: Option<&str>) -> ApiResult<FinancialYear> {
    match raw {
        Some(label) => Ok(FinancialYear::parse(label)?),
        None => Ok(FinancialYear::from_date(
            chrono::Local::now().date_naive(),
        )),
    }
}

/// Missing query parameter means the whole year.
pub fn parse_quarter_selection(raw: Option<&str>) -> ApiResult<QuarterSelection> {
    match raw {
        Some(value) => Ok(QuarterSelection::parse(value)?),
        None => Ok(QuarterSelection::All),
    }
}

/// Kick off closure-type reconciliation without holding up the response.
pub fn trigger_closure_type_reconciliation(state: Arc<AppState>) {
    tokio::spawn(async move {
        match state.deal_service.reconcile_closure_types().await {
            Ok(corrected) if corrected > 0 => {
                tracing::info!("background reconciliation corrected {} deals", corrected);
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("background closure-type reconciliation failed: {}", e);
            }
        }
    });
}
