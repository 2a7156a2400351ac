pub mod deals_model;
pub mod deals_repository;
pub mod deals_service;
pub mod deals_traits;

pub use deals_model::{ClosureType, Deal, EnrichedDeal, NewDeal};
