use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use groupmgr_core::{GroupName, UserName};

/// Submitted checkbox state, keyed by user row.
///
/// A user with no row was not part of the submitted form and is left alone.
/// A user with a row but no entry for a group wants that group unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToggleBatch {
    rows: BTreeMap<UserName, BTreeMap<GroupName, bool>>,
}

impl ToggleBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `user`'s row as submitted (every box unchecked until set).
    pub fn row(&mut self, user: impl Into<UserName>) -> &mut Self {
        self.rows.entry(user.into()).or_default();
        self
    }

    pub fn set(&mut self, user: impl Into<UserName>, group: impl Into<GroupName>, desired: bool) -> &mut Self {
        self.rows.entry(user.into()).or_default().insert(group.into(), desired);
        self
    }

    pub fn check(&mut self, user: impl Into<UserName>, group: impl Into<GroupName>) -> &mut Self {
        self.set(user, group, true)
    }

    pub fn contains_row(&self, user: &UserName) -> bool {
        self.rows.contains_key(user)
    }

    /// Desired membership, or `None` if the user's row was not submitted.
    pub fn desired(&self, user: &UserName, group: &GroupName) -> Option<bool> {
        self.rows
            .get(user)
            .map(|row| row.get(group).copied().unwrap_or(false))
    }
}
