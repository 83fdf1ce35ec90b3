use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use groupmgr_core::{Entity, GroupName, UserName};

/// One directory entry as seen at the start of a cycle.
///
/// The group set is updated in memory only after the directory accepted the
/// corresponding write; the directory remains the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: UserName,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub groups: BTreeSet<GroupName>,
}

impl UserRecord {
    pub fn new(name: impl Into<UserName>) -> Self {
        Self {
            name: name.into(),
            full_name: String::new(),
            email: String::new(),
            groups: BTreeSet::new(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn is_member(&self, group: &GroupName) -> bool {
        self.groups.contains(group)
    }
}

impl Entity for UserRecord {
    type Id = UserName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
