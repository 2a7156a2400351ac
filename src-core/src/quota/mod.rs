pub mod quota_model;
pub mod quota_service;

pub use quota_model::{QuarterPerformance, TeamSelection, ViewScope};
pub use quota_service::QuotaAggregator;
