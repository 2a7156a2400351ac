//! Target editing: field validation, quarter upserts, and the annual split.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::{Error, Result, ValidationError};
use crate::fiscal::{FinancialYear, Quarter};
use crate::targets::targets_model::{NewSalesTarget, SalesTarget};
use crate::targets::targets_traits::{TargetRepositoryTrait, TargetServiceTrait};

/// Parses a user-edited target figure. Rejection is a field-level validation
/// error, never a panic.
pub fn parse_target_amount(raw: &str) -> Result<Decimal> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| {
        Error::Validation(ValidationError::InvalidInput(format!(
            "targetAmount '{}' must be numeric",
            raw
        )))
    })?;
    if amount < Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "targetAmount must not be negative".to_string(),
        )));
    }
    Ok(amount)
}

/// Splits an annual figure into four quarter amounts: floor each quarter to
/// whole units, then hand the remainder to the earliest quarters first.
/// The four parts always sum back to the annual figure.
pub fn split_annual_target(annual: Decimal) -> [Decimal; 4] {
    let per_quarter = (annual / dec!(4)).floor();
    let mut parts = [per_quarter; 4];
    let mut remainder = annual - per_quarter * dec!(4);

    for part in parts.iter_mut() {
        if remainder <= Decimal::ZERO {
            break;
        }
        let extra = remainder.min(Decimal::ONE);
        *part += extra;
        remainder -= extra;
    }
    parts
}

pub struct TargetService<T: TargetRepositoryTrait> {
    target_repo: Arc<T>,
}

impl<T: TargetRepositoryTrait> TargetService<T> {
    pub fn new(target_repo: Arc<T>) -> Self {
        TargetService { target_repo }
    }
}

#[async_trait]
impl<T: TargetRepositoryTrait> TargetServiceTrait for TargetService<T> {
    fn get_targets(&self) -> Result<Vec<SalesTarget>> {
        self.target_repo.load_targets()
    }

    fn get_targets_for_year(&self, financial_year: &FinancialYear) -> Result<Vec<SalesTarget>> {
        self.target_repo.load_targets_for_year(financial_year)
    }

    async fn set_quarter_target(&self, new_target: NewSalesTarget) -> Result<SalesTarget> {
        if new_target.target_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "targetAmount must not be negative".to_string(),
            )));
        }
        if new_target.assigned_to_uid.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "assignedToUid".to_string(),
            )));
        }
        self.target_repo.upsert_target(new_target).await
    }

    /// Splits an annual figure across the four quarters and persists one row
    /// per (year, quarter, uid) in a single transaction.
    async fn set_annual_target(
        &self,
        assigned_to_uid: String,
        financial_year: FinancialYear,
        annual_amount: Decimal,
    ) -> Result<Vec<SalesTarget>> {
        if annual_amount < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "annual target must not be negative".to_string(),
            )));
        }
        if assigned_to_uid.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "assignedToUid".to_string(),
            )));
        }

        let parts = split_annual_target(annual_amount);
        let rows: Vec<NewSalesTarget> = Quarter::ORDERED
            .iter()
            .zip(parts.iter())
            .map(|(quarter, amount)| NewSalesTarget {
                financial_year,
                quarter: *quarter,
                assigned_to_uid: assigned_to_uid.clone(),
                target_amount: *amount,
            })
            .collect();

        log::debug!(
            "Splitting annual target {} for '{}' in {} as {:?}",
            annual_amount,
            assigned_to_uid,
            financial_year,
            parts
        );
        self.target_repo.upsert_targets(rows).await
    }
}
