pub mod users_model;
pub mod users_repository;
pub mod users_service;
pub mod users_traits;

pub use users_model::{Role, User, UserDirectory, SALES_DEPARTMENT};
