use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::fiscal::FinancialYear;
use crate::targets::targets_model::{NewSalesTarget, SalesTarget};

#[async_trait]
pub trait TargetRepositoryTrait: Send + Sync {
    fn load_targets(&self) -> Result<Vec<SalesTarget>>;
    fn load_targets_for_year(&self, financial_year: &FinancialYear) -> Result<Vec<SalesTarget>>;
    /// Writes one quota row, merging on the (year, quarter, uid) triple.
    async fn upsert_target(&self, new_target: NewSalesTarget) -> Result<SalesTarget>;
    /// Writes several quota rows atomically (one transaction).
    async fn upsert_targets(&self, new_targets: Vec<NewSalesTarget>) -> Result<Vec<SalesTarget>>;
    async fn delete_target(&self, id: String) -> Result<usize>;
}

#[async_trait]
pub trait TargetServiceTrait: Send + Sync {
    fn get_targets(&self) -> Result<Vec<SalesTarget>>;
    fn get_targets_for_year(&self, financial_year: &FinancialYear) -> Result<Vec<SalesTarget>>;
    async fn set_quarter_target(&self, new_target: NewSalesTarget) -> Result<SalesTarget>;
    async fn set_annual_target(
        &self,
        assigned_to_uid: String,
        financial_year: FinancialYear,
        annual_amount: Decimal,
    ) -> Result<Vec<SalesTarget>>;
}
