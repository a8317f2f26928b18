use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ForestError;
use crate::list::{Patch, Record, SortKey, StatusCycle};
use crate::validate::{self, FILL_ALL_FIELDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountStatus {
    Active,
    Inactive,
}

impl AccountStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
        }
    }

    /// Natural order: Active first.
    pub fn rank(&self) -> u8 {
        match self {
            AccountStatus::Active => 1,
            AccountStatus::Inactive => 2,
        }
    }
}

impl StatusCycle for AccountStatus {
    const CYCLE: &'static [Self] = &[AccountStatus::Active, AccountStatus::Inactive];

    fn label(&self) -> &'static str {
        self.display_name()
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: AccountStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSort {
    Name,
    Status,
}

impl SortKey for UserSort {
    const ALL: &'static [Self] = &[UserSort::Name, UserSort::Status];

    fn label(&self) -> &'static str {
        match self {
            UserSort::Name => "Name",
            UserSort::Status => "Status",
        }
    }
}

impl Record for UserAccount {
    type Status = AccountStatus;
    type Key = UserSort;

    fn id(&self) -> &str {
        &self.id
    }

    fn assign_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }

    fn compare(&self, other: &Self, key: UserSort) -> Ordering {
        match key {
            UserSort::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            UserSort::Status => self.status.rank().cmp(&other.status.rank()),
        }
    }

    fn status(&self) -> Option<AccountStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserEdit {
    pub name: String,
    pub role: String,
}

impl UserEdit {
    pub fn from_account(user: &UserAccount) -> Self {
        Self {
            name: user.name.clone(),
            role: user.role.clone(),
        }
    }
}

impl Patch<UserAccount> for UserEdit {
    fn apply_to(&self, user: &mut UserAccount) -> Result<(), ForestError> {
        user.name = validate::required(&self.name, FILL_ALL_FIELDS)?;
        user.role = validate::required(&self.role, FILL_ALL_FIELDS)?;
        Ok(())
    }
}
