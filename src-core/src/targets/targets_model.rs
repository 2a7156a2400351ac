//! Quota assignment models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::{FinancialYear, Quarter};

/// A quota row. Identity is the (financialYear, quarter, assignedToUid)
/// triple; the id is a storage detail and changes when a triple is rewritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTarget {
    pub id: String,
    pub financial_year: FinancialYear,
    pub quarter: Quarter,
    pub assigned_to_uid: String,
    pub target_amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSalesTarget {
    pub financial_year: FinancialYear,
    pub quarter: Quarter,
    pub assigned_to_uid: String,
    pub target_amount: Decimal,
}

impl SalesTarget {
    pub fn matches_triple(&self, fy: &FinancialYear, quarter: Quarter, uid: &str) -> bool {
        self.financial_year == *fy && self.quarter == quarter && self.assigned_to_uid == uid
    }
}
