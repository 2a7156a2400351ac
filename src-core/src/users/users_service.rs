use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{User, UserDirectory};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};

pub struct UserService<T: UserRepositoryTrait> {
    user_repo: Arc<T>,
}

impl<T: UserRepositoryTrait> UserService<T> {
    pub fn new(user_repo: Arc<T>) -> Self {
        UserService { user_repo }
    }
}

#[async_trait]
impl<T: UserRepositoryTrait> UserServiceTrait for UserService<T> {
    fn get_users(&self) -> Result<Vec<User>> {
        self.user_repo.load_users()
    }

    fn directory(&self) -> Result<UserDirectory> {
        Ok(UserDirectory::new(self.user_repo.load_users()?))
    }

    async fn upsert_user(&self, user: User) -> Result<User> {
        self.user_repo.upsert_user(user).await
    }

    async fn delete_user(&self, uid: String) -> Result<usize> {
        self.user_repo.delete_user(uid).await
    }
}
