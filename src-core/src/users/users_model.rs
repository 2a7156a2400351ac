//! Staff directory models and the reporting hierarchy lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Department whose staff participate in pipeline rollups.
pub const SALES_DEPARTMENT: &str = "Sales";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Director,
    Head,
    Manager,
    #[serde(rename = "Assistant Manager")]
    AssistantManager,
    Executive,
    Admin,
}

impl Role {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Director" => Some(Role::Director),
            "Head" => Some(Role::Head),
            "Manager" => Some(Role::Manager),
            "Assistant Manager" => Some(Role::AssistantManager),
            "Executive" => Some(Role::Executive),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Director => "Director",
            Role::Head => "Head",
            Role::Manager => "Manager",
            Role::AssistantManager => "Assistant Manager",
            Role::Executive => "Executive",
            Role::Admin => "Admin",
        }
    }

    /// Roles that only ever see their own pipeline.
    pub fn is_individual_contributor(&self) -> bool {
        matches!(self, Role::AssistantManager | Role::Executive)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub name: String,
    pub role: Role,
    pub department: String,
    /// Uid of the manager this user reports to. A back-reference, not an
    /// ownership link.
    pub reporting_manager_uid: Option<String>,
}

/// Uid-keyed directory used for hierarchy resolution only, never for
/// monetary computation.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    by_uid: HashMap<String, User>,
}

impl UserDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        UserDirectory {
            by_uid: users.into_iter().map(|u| (u.uid.clone(), u)).collect(),
        }
    }

    pub fn get(&self, uid: &str) -> Option<&User> {
        self.by_uid.get(uid)
    }

    pub fn len(&self) -> usize {
        self.by_uid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uid.is_empty()
    }

    /// Everyone in Sales below Director level.
    pub fn sales_staff(&self) -> Vec<&User> {
        self.by_uid
            .values()
            .filter(|u| {
                u.department == SALES_DEPARTMENT
                    && matches!(
                        u.role,
                        Role::Head | Role::Manager | Role::AssistantManager | Role::Executive
                    )
            })
            .collect()
    }

    pub fn sales_managers(&self) -> Vec<&User> {
        self.by_uid
            .values()
            .filter(|u| u.department == SALES_DEPARTMENT && u.role == Role::Manager)
            .collect()
    }

    /// Assistant Managers and Executives reporting to the given manager,
    /// joined on uid.
    pub fn direct_reports(&self, manager_uid: &str) -> Vec<&User> {
        self.by_uid
            .values()
            .filter(|u| {
                u.role.is_individual_contributor()
                    && u.reporting_manager_uid.as_deref() == Some(manager_uid)
            })
            .collect()
    }
}
