//! In-memory repositories and fixture builders shared by the service tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;

use salesdesk_core::deals::deals_model::{ClosureType, Deal, NewDeal};
use salesdesk_core::deals::deals_traits::DealRepositoryTrait;
use salesdesk_core::errors::Result;
use salesdesk_core::fiscal::{FinancialYear, Quarter};
use salesdesk_core::targets::targets_model::{NewSalesTarget, SalesTarget};
use salesdesk_core::targets::targets_traits::TargetRepositoryTrait;
use salesdesk_core::users::users_model::{Role, User};
use salesdesk_core::users::users_traits::UserRepositoryTrait;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn deal(id: &str, uid: &str, total_cost: Decimal, closed_date: Option<NaiveDate>) -> Deal {
    Deal {
        id: id.to_string(),
        assigned_to_uid: uid.to_string(),
        total_cost,
        closed_date,
        contract_start_date: None,
        closure_type: ClosureType::New,
    }
}

pub fn target(fy: FinancialYear, quarter: Quarter, uid: &str, amount: Decimal) -> SalesTarget {
    SalesTarget {
        id: format!("{}-{}-{}", fy.label(), quarter.label(), uid),
        financial_year: fy,
        quarter,
        assigned_to_uid: uid.to_string(),
        target_amount: amount,
    }
}

pub fn user(uid: &str, name: &str, role: Role, department: &str, manager: Option<&str>) -> User {
    User {
        uid: uid.to_string(),
        name: name.to_string(),
        role,
        department: department.to_string(),
        reporting_manager_uid: manager.map(|m| m.to_string()),
    }
}

#[derive(Default)]
pub struct MemoryDealRepository {
    deals: DashMap<String, Deal>,
}

impl MemoryDealRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deals(deals: Vec<Deal>) -> Self {
        let repo = Self::default();
        for deal in deals {
            repo.deals.insert(deal.id.clone(), deal);
        }
        repo
    }
}

#[async_trait]
impl DealRepositoryTrait for MemoryDealRepository {
    fn load_closed_deals(&self) -> Result<Vec<Deal>> {
        let mut all: Vec<Deal> = self.deals.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Deal>> {
        Ok(self.deals.get(id).map(|e| e.value().clone()))
    }

    async fn insert_new_deal(&self, new_deal: NewDeal) -> Result<Deal> {
        let deal = Deal {
            id: uuid::Uuid::new_v4().to_string(),
            assigned_to_uid: new_deal.assigned_to_uid,
            total_cost: new_deal.total_cost,
            closed_date: new_deal.closed_date,
            contract_start_date: new_deal.contract_start_date,
            closure_type: new_deal.closure_type,
        };
        self.deals.insert(deal.id.clone(), deal.clone());
        Ok(deal)
    }

    async fn update_deal(&self, deal: Deal) -> Result<Deal> {
        self.deals.insert(deal.id.clone(), deal.clone());
        Ok(deal)
    }

    async fn delete_deal(&self, id: String) -> Result<usize> {
        Ok(self.deals.remove(&id).map(|_| 1).unwrap_or(0))
    }

    async fn update_closure_type(&self, id: &str, closure_type: ClosureType) -> Result<usize> {
        match self.deals.get_mut(id) {
            Some(mut entry) => {
                entry.closure_type = closure_type;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[derive(Default)]
pub struct MemoryTargetRepository {
    targets: DashMap<(String, String, String), SalesTarget>,
}

impl MemoryTargetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TargetRepositoryTrait for MemoryTargetRepository {
    fn load_targets(&self) -> Result<Vec<SalesTarget>> {
        let mut all: Vec<SalesTarget> = self.targets.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    fn load_targets_for_year(&self, financial_year: &FinancialYear) -> Result<Vec<SalesTarget>> {
        Ok(self
            .load_targets()?
            .into_iter()
            .filter(|t| t.financial_year == *financial_year)
            .collect())
    }

    async fn upsert_target(&self, new_target: NewSalesTarget) -> Result<SalesTarget> {
        let key = (
            new_target.financial_year.label(),
            new_target.quarter.label().to_string(),
            new_target.assigned_to_uid.clone(),
        );
        let row = SalesTarget {
            id: uuid::Uuid::new_v4().to_string(),
            financial_year: new_target.financial_year,
            quarter: new_target.quarter,
            assigned_to_uid: new_target.assigned_to_uid,
            target_amount: new_target.target_amount,
        };
        self.targets.insert(key, row.clone());
        Ok(row)
    }

    async fn upsert_targets(&self, new_targets: Vec<NewSalesTarget>) -> Result<Vec<SalesTarget>> {
        let mut rows = Vec::with_capacity(new_targets.len());
        for new_target in new_targets {
            rows.push(self.upsert_target(new_target).await?);
        }
        Ok(rows)
    }

    async fn delete_target(&self, id: String) -> Result<usize> {
        let key = self
            .targets
            .iter()
            .find(|e| e.value().id == id)
            .map(|e| e.key().clone());
        Ok(key.and_then(|k| self.targets.remove(&k)).map(|_| 1).unwrap_or(0))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: DashMap<String, User>,
    pub lookup_count: AtomicUsize,
}

impl MemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        let repo = Self::default();
        for user in users {
            repo.users.insert(user.uid.clone(), user);
        }
        repo
    }

    pub fn lookups(&self) -> usize {
        self.lookup_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryUserRepository {
    fn load_users(&self) -> Result<Vec<User>> {
        let mut all: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.uid.cmp(&b.uid));
        Ok(all)
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>> {
        self.lookup_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.get(uid).map(|e| e.value().clone()))
    }

    async fn upsert_user(&self, user: User) -> Result<User> {
        self.users.insert(user.uid.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user(&self, uid: String) -> Result<usize> {
        Ok(self.users.remove(&uid).map(|_| 1).unwrap_or(0))
    }
}
