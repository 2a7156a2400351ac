pub mod deals;
pub mod performance;
pub mod shared;
pub mod targets;
pub mod users;
