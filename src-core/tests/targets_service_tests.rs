//! Target editing: quarter upserts, the annual split, and validation.

mod support;

use std::sync::Arc;

use rust_decimal_macros::dec;

use salesdesk_core::errors::Error;
use salesdesk_core::fiscal::{FinancialYear, Quarter};
use salesdesk_core::targets::targets_model::NewSalesTarget;
use salesdesk_core::targets::targets_service::TargetService;
use salesdesk_core::targets::targets_traits::{TargetRepositoryTrait, TargetServiceTrait};

use support::MemoryTargetRepository;

fn fy() -> FinancialYear {
    FinancialYear::new(2024)
}

fn quarter_target(quarter: Quarter, amount: rust_decimal::Decimal) -> NewSalesTarget {
    NewSalesTarget {
        financial_year: fy(),
        quarter,
        assigned_to_uid: "u1".to_string(),
        target_amount: amount,
    }
}

#[tokio::test]
async fn upserting_the_same_triple_merges_to_one_row() {
    let repo = Arc::new(MemoryTargetRepository::new());
    let service = TargetService::new(Arc::clone(&repo));

    service
        .set_quarter_target(quarter_target(Quarter::Q1, dec!(100000)))
        .await
        .unwrap();
    service
        .set_quarter_target(quarter_target(Quarter::Q1, dec!(250000)))
        .await
        .unwrap();

    let targets = repo.load_targets_for_year(&fy()).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].target_amount, dec!(250000));
    assert_eq!(targets[0].quarter, Quarter::Q1);
}

#[tokio::test]
async fn negative_or_unowned_targets_are_rejected() {
    let repo = Arc::new(MemoryTargetRepository::new());
    let service = TargetService::new(Arc::clone(&repo));

    let err = service
        .set_quarter_target(quarter_target(Quarter::Q1, dec!(-1)))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = service
        .set_quarter_target(NewSalesTarget {
            financial_year: fy(),
            quarter: Quarter::Q1,
            assigned_to_uid: "  ".to_string(),
            target_amount: dec!(1000),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    assert!(repo.load_targets().unwrap().is_empty());
}

#[tokio::test]
async fn annual_target_splits_into_four_quarter_rows() {
    let repo = Arc::new(MemoryTargetRepository::new());
    let service = TargetService::new(Arc::clone(&repo));

    let rows = service
        .set_annual_target("u1".to_string(), fy(), dec!(1001))
        .await
        .unwrap();
    assert_eq!(rows.len(), 4);

    let mut persisted = repo.load_targets_for_year(&fy()).unwrap();
    persisted.sort_by_key(|t| t.quarter.label());
    let amounts: Vec<_> = persisted.iter().map(|t| t.target_amount).collect();
    // Remainder lands on the earliest quarter.
    assert_eq!(amounts, vec![dec!(251), dec!(250), dec!(250), dec!(250)]);
}

#[tokio::test]
async fn re_editing_an_annual_figure_replaces_the_same_four_rows() {
    let repo = Arc::new(MemoryTargetRepository::new());
    let service = TargetService::new(Arc::clone(&repo));

    service
        .set_annual_target("u1".to_string(), fy(), dec!(400000))
        .await
        .unwrap();
    service
        .set_annual_target("u1".to_string(), fy(), dec!(800000))
        .await
        .unwrap();

    let persisted = repo.load_targets_for_year(&fy()).unwrap();
    assert_eq!(persisted.len(), 4);
    for t in &persisted {
        assert_eq!(t.target_amount, dec!(200000));
    }
}
