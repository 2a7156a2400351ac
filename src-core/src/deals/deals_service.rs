//! Deal CRUD, spreadsheet import/export, closure-type reconciliation, and
//! directory enrichment.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

use crate::cache::RecordCache;
use crate::deals::deals_model::{ClosureType, Deal, EnrichedDeal, ImportSummary, NewDeal};
use crate::deals::deals_traits::{DealRepositoryTrait, DealServiceTrait};
use crate::errors::{ImportError, Result};
use crate::users::users_model::User;
use crate::users::users_traits::UserRepositoryTrait;

/// Upper bound on concurrent directory lookups during enrichment.
const ENRICHMENT_BATCH_SIZE: usize = 10;

pub struct DealService<T: DealRepositoryTrait> {
    deal_repo: Arc<T>,
}

#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DealCsvRow {
    assigned_to_uid: String,
    total_cost: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    closed_date: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    contract_start_date: Option<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    closure_type: Option<String>,
}

/// Accepts ISO dates and the DD/MM/YYYY form spreadsheets tend to produce.
fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

impl<T: DealRepositoryTrait> DealService<T> {
    pub fn new(deal_repo: Arc<T>) -> Self {
        DealService { deal_repo }
    }

    /// Bulk-import deals from a CSV export. Rows without an owner or with a
    /// non-numeric amount are skipped; a date that fails to parse imports the
    /// deal with no date, which keeps it out of every aggregate.
    pub async fn import_csv(&self, reader: impl std::io::Read) -> Result<ImportSummary> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut summary = ImportSummary::default();

        for record in csv_reader.deserialize::<DealCsvRow>() {
            let row = match record {
                Ok(row) => row,
                Err(e) => {
                    log::warn!("Skipping malformed CSV row: {}", e);
                    summary.skipped += 1;
                    continue;
                }
            };

            if row.assigned_to_uid.trim().is_empty() {
                log::warn!("Skipping CSV row with no assignedToUid");
                summary.skipped += 1;
                continue;
            }

            let total_cost = match Decimal::from_str(row.total_cost.trim()) {
                Ok(amount) if amount >= Decimal::ZERO => amount,
                _ => {
                    log::warn!("Skipping CSV row with non-numeric totalCost '{}'", row.total_cost);
                    summary.skipped += 1;
                    continue;
                }
            };

            let closed_date = row.closed_date.as_deref().and_then(|raw| {
                let parsed = parse_flexible_date(raw);
                if parsed.is_none() {
                    log::warn!("Unparsable closedDate '{}', importing deal without a date", raw);
                }
                parsed
            });
            let contract_start_date =
                row.contract_start_date.as_deref().and_then(parse_flexible_date);

            let new_deal = NewDeal {
                assigned_to_uid: row.assigned_to_uid.trim().to_string(),
                total_cost,
                closed_date,
                contract_start_date,
                closure_type: row
                    .closure_type
                    .as_deref()
                    .map(ClosureType::from_db)
                    .unwrap_or(ClosureType::New),
            };
            self.deal_repo.insert_new_deal(new_deal).await?;
            summary.imported += 1;
        }

        log::info!(
            "Deal import finished: {} imported, {} skipped",
            summary.imported,
            summary.skipped
        );
        Ok(summary)
    }

    /// Write all closed deals as CSV, mirroring the import column layout.
    pub fn export_csv(&self, writer: impl std::io::Write) -> Result<usize> {
        let deals = self.deal_repo.load_closed_deals()?;
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record([
                "id",
                "assignedToUid",
                "totalCost",
                "closedDate",
                "contractStartDate",
                "closureType",
            ])
            .map_err(ImportError::from)?;

        for deal in &deals {
            csv_writer
                .write_record([
                    deal.id.as_str(),
                    deal.assigned_to_uid.as_str(),
                    &deal.total_cost.to_string(),
                    &deal
                        .closed_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    &deal
                        .contract_start_date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    deal.closure_type.as_str(),
                ])
                .map_err(ImportError::from)?;
        }
        csv_writer.flush().map_err(ImportError::from)?;
        Ok(deals.len())
    }

    /// Re-derive each deal's closure type from its contract start date and
    /// persist any correction. Last write wins on the deal row.
    pub async fn reconcile_closure_types(&self) -> Result<usize> {
        let deals = self.deal_repo.load_closed_deals()?;
        let mut corrected = 0;

        for deal in deals {
            if let Some(implied) = deal.implied_closure_type() {
                if implied != deal.closure_type {
                    self.deal_repo.update_closure_type(&deal.id, implied).await?;
                    corrected += 1;
                }
            }
        }

        if corrected > 0 {
            log::info!("Corrected closure type on {} deals", corrected);
        }
        Ok(corrected)
    }
}

#[async_trait]
impl<T: DealRepositoryTrait> DealServiceTrait for DealService<T> {
    fn get_closed_deals(&self) -> Result<Vec<Deal>> {
        self.deal_repo.load_closed_deals()
    }

    async fn create_deal(&self, new_deal: NewDeal) -> Result<Deal> {
        self.deal_repo.insert_new_deal(new_deal).await
    }

    async fn update_deal(&self, deal: Deal) -> Result<Deal> {
        self.deal_repo.update_deal(deal).await
    }

    async fn delete_deal(&self, id: String) -> Result<usize> {
        self.deal_repo.delete_deal(id).await
    }
}

/// Attach owner names from the directory, batching the lookups and going
/// through the caller's cache so repeated renders don't refetch.
pub async fn enrich_deals<U: UserRepositoryTrait + 'static>(
    deals: Vec<Deal>,
    user_repo: Arc<U>,
    cache: &RecordCache<User>,
) -> Vec<EnrichedDeal> {
    let mut names: HashMap<String, String> = HashMap::new();
    let mut missing: Vec<String> = Vec::new();

    for deal in &deals {
        let uid = &deal.assigned_to_uid;
        if names.contains_key(uid) || missing.contains(uid) {
            continue;
        }
        match cache.get(uid) {
            Some(user) => {
                names.insert(uid.clone(), user.name);
            }
            None => missing.push(uid.clone()),
        }
    }

    let fetched: Vec<Option<User>> = stream::iter(missing)
        .map(|uid| {
            let repo = Arc::clone(&user_repo);
            async move {
                match repo.find_by_uid(&uid).await {
                    Ok(user) => user,
                    Err(e) => {
                        log::warn!("Directory lookup for '{}' failed during enrichment: {}", uid, e);
                        None
                    }
                }
            }
        })
        .buffer_unordered(ENRICHMENT_BATCH_SIZE)
        .collect()
        .await;

    for user in fetched.into_iter().flatten() {
        cache.insert(user.uid.clone(), user.clone());
        names.insert(user.uid.clone(), user.name);
    }

    deals
        .into_iter()
        .map(|deal| {
            let owner_name = names.get(&deal.assigned_to_uid).cloned();
            EnrichedDeal { deal, owner_name }
        })
        .collect()
}
