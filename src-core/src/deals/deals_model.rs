//! Closed-deal models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosureType {
    New,
    Renewal,
}

impl ClosureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClosureType::New => "new",
            ClosureType::Renewal => "renewal",
        }
    }

    /// Storage values are lowercase; anything unrecognized falls back to
    /// `New` so a dirty row never breaks a load.
    pub fn from_db(value: &str) -> Self {
        match value {
            "renewal" => ClosureType::Renewal,
            _ => ClosureType::New,
        }
    }
}

/// A closed sale. Dates that failed to parse at ingestion are carried as
/// `None` and stay out of every aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: String,
    pub assigned_to_uid: String,
    pub total_cost: Decimal,
    pub closed_date: Option<NaiveDate>,
    pub contract_start_date: Option<NaiveDate>,
    pub closure_type: ClosureType,
}

impl Deal {
    /// The closure type implied by contract-date inspection: a contract that
    /// started strictly before the deal closed is a renewal.
    pub fn implied_closure_type(&self) -> Option<ClosureType> {
        let closed = self.closed_date?;
        let contract_start = self.contract_start_date?;
        if contract_start < closed {
            Some(ClosureType::Renewal)
        } else {
            Some(ClosureType::New)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    pub assigned_to_uid: String,
    pub total_cost: Decimal,
    pub closed_date: Option<NaiveDate>,
    pub contract_start_date: Option<NaiveDate>,
    pub closure_type: ClosureType,
}

/// A deal joined with directory data for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDeal {
    #[serde(flatten)]
    pub deal: Deal,
    pub owner_name: Option<String>,
}

/// Outcome of a bulk CSV import.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}
