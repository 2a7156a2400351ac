use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use diesel::prelude::*;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::db::{get_connection, DbPool};
use crate::deals::deals_model::{ClosureType, Deal, NewDeal};
use crate::deals::deals_traits::DealRepositoryTrait;
use crate::errors::{Error, Result};
use crate::schema::deals;

/// SQLite stores amounts as REAL; the domain works in `Decimal`.
#[derive(Debug, Clone, Queryable)]
struct DealRow {
    id: String,
    assigned_to_uid: String,
    total_cost: f64,
    closed_date: Option<NaiveDate>,
    contract_start_date: Option<NaiveDate>,
    closure_type: String,
    #[allow(dead_code)]
    created_at: NaiveDateTime,
    #[allow(dead_code)]
    updated_at: NaiveDateTime,
}

impl From<DealRow> for Deal {
    fn from(row: DealRow) -> Self {
        Deal {
            id: row.id,
            assigned_to_uid: row.assigned_to_uid,
            total_cost: Decimal::from_f64_retain(row.total_cost).unwrap_or_default(),
            closed_date: row.closed_date,
            contract_start_date: row.contract_start_date,
            closure_type: ClosureType::from_db(&row.closure_type),
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = deals)]
struct NewDealRow<'a> {
    id: &'a str,
    assigned_to_uid: &'a str,
    total_cost: f64,
    closed_date: Option<NaiveDate>,
    contract_start_date: Option<NaiveDate>,
    closure_type: &'a str,
}

pub struct SqliteDealRepository {
    pool: DbPool,
}

impl SqliteDealRepository {
    pub fn new(pool: DbPool) -> Self {
        SqliteDealRepository { pool }
    }
}

#[async_trait]
impl DealRepositoryTrait for SqliteDealRepository {
    fn load_closed_deals(&self) -> Result<Vec<Deal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = deals::table
            .order(deals::closed_date.desc())
            .load::<DealRow>(&mut conn)?;
        Ok(rows.into_iter().map(Deal::from).collect())
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Deal>> {
        let mut conn = get_connection(&self.pool)?;
        let row = deals::table.find(id).first::<DealRow>(&mut conn).optional()?;
        Ok(row.map(Deal::from))
    }

    async fn insert_new_deal(&self, new_deal: NewDeal) -> Result<Deal> {
        let mut conn = get_connection(&self.pool)?;
        let id = uuid::Uuid::new_v4().to_string();
        let row = NewDealRow {
            id: &id,
            assigned_to_uid: &new_deal.assigned_to_uid,
            total_cost: new_deal.total_cost.to_f64().unwrap_or(0.0),
            closed_date: new_deal.closed_date,
            contract_start_date: new_deal.contract_start_date,
            closure_type: new_deal.closure_type.as_str(),
        };
        diesel::insert_into(deals::table)
            .values(&row)
            .execute(&mut conn)?;
        Ok(Deal {
            id,
            assigned_to_uid: new_deal.assigned_to_uid,
            total_cost: new_deal.total_cost,
            closed_date: new_deal.closed_date,
            contract_start_date: new_deal.contract_start_date,
            closure_type: new_deal.closure_type,
        })
    }

    async fn update_deal(&self, deal: Deal) -> Result<Deal> {
        let mut conn = get_connection(&self.pool)?;
        let updated = diesel::update(deals::table.find(&deal.id))
            .set((
                deals::assigned_to_uid.eq(&deal.assigned_to_uid),
                deals::total_cost.eq(deal.total_cost.to_f64().unwrap_or(0.0)),
                deals::closed_date.eq(deal.closed_date),
                deals::contract_start_date.eq(deal.contract_start_date),
                deals::closure_type.eq(deal.closure_type.as_str()),
                deals::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        if updated == 0 {
            return Err(Error::NotFound(format!("Deal '{}'", deal.id)));
        }
        Ok(deal)
    }

    async fn delete_deal(&self, id: String) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let deleted = diesel::delete(deals::table.find(&id)).execute(&mut conn)?;
        Ok(deleted)
    }

    async fn update_closure_type(&self, id: &str, closure_type: ClosureType) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let updated = diesel::update(deals::table.find(id))
            .set((
                deals::closure_type.eq(closure_type.as_str()),
                deals::updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;
        Ok(updated)
    }
}
