pub mod cache;
pub mod db;
pub mod deals;
pub mod errors;
pub mod fiscal;
pub mod quota;
pub mod schema;
pub mod targets;
pub mod users;

pub use cache::RecordCache;
pub use fiscal::{FinancialYear, Quarter, QuarterSelection};
pub use quota::quota_service::QuotaAggregator;
