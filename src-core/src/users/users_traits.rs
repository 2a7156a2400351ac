use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{User, UserDirectory};

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn load_users(&self) -> Result<Vec<User>>;
    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>>;
    async fn upsert_user(&self, user: User) -> Result<User>;
    async fn delete_user(&self, uid: String) -> Result<usize>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_users(&self) -> Result<Vec<User>>;
    fn directory(&self) -> Result<UserDirectory>;
    async fn upsert_user(&self, user: User) -> Result<User>;
    async fn delete_user(&self, uid: String) -> Result<usize>;
}
