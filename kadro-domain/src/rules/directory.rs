//! The staff/employee directory port queried during receiver resolution.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::errors::RuleError;
use crate::shared_types::{StaffRole, SubjectId};

/// A directory record: one staff or employee account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAccount {
    pub id: SubjectId,
    pub display_name: String,
    pub role: StaffRole,
    pub active: bool,
}

impl StaffAccount {
    pub fn new(
        id: impl Into<SubjectId>,
        display_name: impl Into<String>,
        role: StaffRole,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
            active: true,
        }
    }
}

/// Read-only view of the account directory owned by the surrounding HR
/// application. Rules use it to fan events out to the privileged staff set.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// All active accounts whose role is in `roles`.
    async fn active_staff_with_roles(
        &self,
        roles: &[StaffRole],
    ) -> Result<Vec<StaffAccount>, RuleError>;
}

/// In-memory directory used in tests and development.
#[derive(Default)]
pub struct InMemoryStaffDirectory {
    accounts: RwLock<Vec<StaffAccount>>,
}

impl InMemoryStaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, account: StaffAccount) {
        self.accounts.write().await.push(account);
    }

    /// Marks an account inactive, leaving the record in place.
    pub async fn deactivate(&self, id: &SubjectId) {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.iter_mut().find(|a| &a.id == id) {
            account.active = false;
        }
    }
}

#[async_trait]
impl StaffDirectory for InMemoryStaffDirectory {
    async fn active_staff_with_roles(
        &self,
        roles: &[StaffRole],
    ) -> Result<Vec<StaffAccount>, RuleError> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .filter(|a| a.active && roles.contains(&a.role))
            .cloned()
            .collect())
    }
}
