use async_trait::async_trait;

use crate::deals::deals_model::{ClosureType, Deal, NewDeal};
use crate::errors::Result;

#[async_trait]
pub trait DealRepositoryTrait: Send + Sync {
    fn load_closed_deals(&self) -> Result<Vec<Deal>>;
    fn find_by_id(&self, id: &str) -> Result<Option<Deal>>;
    async fn insert_new_deal(&self, new_deal: NewDeal) -> Result<Deal>;
    async fn update_deal(&self, deal: Deal) -> Result<Deal>;
    async fn delete_deal(&self, id: String) -> Result<usize>;
    async fn update_closure_type(&self, id: &str, closure_type: ClosureType) -> Result<usize>;
}

#[async_trait]
pub trait DealServiceTrait: Send + Sync {
    fn get_closed_deals(&self) -> Result<Vec<Deal>>;
    async fn create_deal(&self, new_deal: NewDeal) -> Result<Deal>;
    async fn update_deal(&self, deal: Deal) -> Result<Deal>;
    async fn delete_deal(&self, id: String) -> Result<usize>;
}
