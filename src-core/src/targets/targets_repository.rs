use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::db::{get_connection, DbPool};
use crate::errors::{Error, Result};
use crate::fiscal::{FinancialYear, Quarter};
use crate::schema::sales_targets;
use crate::targets::targets_model::{NewSalesTarget, SalesTarget};
use crate::targets::targets_traits::TargetRepositoryTrait;

#[derive(Debug, Clone, Queryable)]
struct TargetRow {
    id: String,
    financial_year: String,
    quarter: String,
    assigned_to_uid: String,
    target_amount: f64,
    #[allow(dead_code)]
    created_at: NaiveDateTime,
    #[allow(dead_code)]
    updated_at: NaiveDateTime,
}

impl TargetRow {
    /// Rows with an unreadable year or quarter label are skipped with a
    /// warning instead of failing the load.
    fn into_target(self) -> Option<SalesTarget> {
        let financial_year = match FinancialYear::parse(&self.financial_year) {
            Ok(fy) => fy,
            Err(_) => {
                log::warn!(
                    "Skipping target '{}' with unreadable financial year '{}'",
                    self.id,
                    self.financial_year
                );
                return None;
            }
        };
        let quarter = match Quarter::parse(&self.quarter) {
            Ok(q) => q,
            Err(_) => {
                log::warn!(
                    "Skipping target '{}' with unreadable quarter '{}'",
                    self.id,
                    self.quarter
                );
                return None;
            }
        };
        Some(SalesTarget {
            id: self.id,
            financial_year,
            quarter,
            assigned_to_uid: self.assigned_to_uid,
            target_amount: Decimal::from_f64_retain(self.target_amount).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = sales_targets)]
struct NewTargetRow<'a> {
    id: &'a str,
    financial_year: String,
    quarter: &'a str,
    assigned_to_uid: &'a str,
    target_amount: f64,
}

pub struct SqliteTargetRepository {
    pool: DbPool,
}

impl SqliteTargetRepository {
    pub fn new(pool: DbPool) -> Self {
        SqliteTargetRepository { pool }
    }

    /// REPLACE INTO keyed by the UNIQUE (year, quarter, uid) constraint:
    /// duplicate triples merge, last write wins.
    fn replace_row(conn: &mut SqliteConnection, new_target: &NewSalesTarget) -> Result<SalesTarget> {
        let id = uuid::Uuid::new_v4().to_string();
        let row = NewTargetRow {
            id: &id,
            financial_year: new_target.financial_year.label(),
            quarter: new_target.quarter.label(),
            assigned_to_uid: &new_target.assigned_to_uid,
            target_amount: new_target.target_amount.to_f64().unwrap_or(0.0),
        };
        diesel::replace_into(sales_targets::table)
            .values(&row)
            .execute(conn)?;
        Ok(SalesTarget {
            id,
            financial_year: new_target.financial_year,
            quarter: new_target.quarter,
            assigned_to_uid: new_target.assigned_to_uid.clone(),
            target_amount: new_target.target_amount,
        })
    }
}

#[async_trait]
impl TargetRepositoryTrait for SqliteTargetRepository {
    fn load_targets(&self) -> Result<Vec<SalesTarget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = sales_targets::table.load::<TargetRow>(&mut conn)?;
        Ok(rows.into_iter().filter_map(TargetRow::into_target).collect())
    }

    fn load_targets_for_year(&self, financial_year: &FinancialYear) -> Result<Vec<SalesTarget>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = sales_targets::table
            .filter(sales_targets::financial_year.eq(financial_year.label()))
            .load::<TargetRow>(&mut conn)?;
        Ok(rows.into_iter().filter_map(TargetRow::into_target).collect())
    }

    async fn upsert_target(&self, new_target: NewSalesTarget) -> Result<SalesTarget> {
        let mut conn = get_connection(&self.pool)?;
        Self::replace_row(&mut conn, &new_target)
    }

    async fn upsert_targets(&self, new_targets: Vec<NewSalesTarget>) -> Result<Vec<SalesTarget>> {
        let mut conn = get_connection(&self.pool)?;
        conn.transaction::<Vec<SalesTarget>, Error, _>(|conn| {
            new_targets
                .iter()
                .map(|t| Self::replace_row(conn, t))
                .collect()
        })
    }

    async fn delete_target(&self, id: String) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let deleted = diesel::delete(sales_targets::table.find(&id)).execute(&mut conn)?;
        Ok(deleted)
    }
}
