use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool};
use crate::errors::Result;
use crate::schema::users;
use crate::users::users_model::{Role, User};
use crate::users::users_traits::UserRepositoryTrait;

#[derive(Debug, Clone, Queryable)]
struct UserRow {
    uid: String,
    name: String,
    role: String,
    department: String,
    reporting_manager_uid: Option<String>,
    #[allow(dead_code)]
    created_at: NaiveDateTime,
    #[allow(dead_code)]
    updated_at: NaiveDateTime,
}

impl UserRow {
    /// Rows carrying a role label the application does not know are skipped
    /// rather than failing the whole directory load.
    fn into_user(self) -> Option<User> {
        match Role::from_label(&self.role) {
            Some(role) => Some(User {
                uid: self.uid,
                name: self.name,
                role,
                department: self.department,
                reporting_manager_uid: self.reporting_manager_uid,
            }),
            None => {
                log::warn!("Skipping user '{}' with unknown role '{}'", self.uid, self.role);
                None
            }
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
struct NewUserRow<'a> {
    uid: &'a str,
    name: &'a str,
    role: &'a str,
    department: &'a str,
    reporting_manager_uid: Option<&'a str>,
}

pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        SqliteUserRepository { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for SqliteUserRepository {
    fn load_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = users::table
            .order(users::name.asc())
            .load::<UserRow>(&mut conn)?;
        Ok(rows.into_iter().filter_map(UserRow::into_user).collect())
    }

    async fn find_by_uid(&self, uid: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let row = users::table
            .find(uid)
            .first::<UserRow>(&mut conn)
            .optional()?;
        Ok(row.and_then(UserRow::into_user))
    }

    async fn upsert_user(&self, user: User) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        let row = NewUserRow {
            uid: &user.uid,
            name: &user.name,
            role: user.role.label(),
            department: &user.department,
            reporting_manager_uid: user.reporting_manager_uid.as_deref(),
        };
        diesel::replace_into(users::table)
            .values(&row)
            .execute(&mut conn)?;
        Ok(user)
    }

    async fn delete_user(&self, uid: String) -> Result<usize> {
        let mut conn = get_connection(&self.pool)?;
        let deleted = diesel::delete(users::table.find(&uid)).execute(&mut conn)?;
        Ok(deleted)
    }
}
