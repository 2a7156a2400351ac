pub mod targets_model;
pub mod targets_repository;
pub mod targets_service;
pub mod targets_traits;

pub use targets_model::{NewSalesTarget, SalesTarget};
