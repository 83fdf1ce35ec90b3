use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use groupmgr_core::GroupName;

use crate::PrincipalRef;

/// Everything one evaluation cycle needs to know about what may be managed
/// and by whom.
///
/// Built fresh per cycle from already-parsed sources (inline tag arguments or
/// the fallback configuration page, plus host settings).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Groups offered for editing, in display order.
    #[serde(default)]
    pub manageable_groups: Vec<GroupName>,

    /// Users and groups allowed to operate the manager.
    #[serde(default)]
    pub managers: Vec<PrincipalRef>,

    /// Never editable, whoever asks.
    #[serde(default)]
    pub forbidden_groups: BTreeSet<GroupName>,

    /// Editable by superusers only.
    #[serde(default)]
    pub admin_groups: BTreeSet<GroupName>,
}

impl ManagerConfig {
    pub fn new<I, G>(manageable_groups: I, managers: Vec<PrincipalRef>) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        Self {
            manageable_groups: manageable_groups.into_iter().map(Into::into).collect(),
            managers,
            ..Default::default()
        }
    }

    pub fn with_forbidden_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        self.forbidden_groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn with_admin_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        self.admin_groups.extend(groups.into_iter().map(Into::into));
        self
    }

    /// The groups a requester with the given superuser status may edit.
    pub fn editable_groups(&self, requester_is_superuser: bool) -> Vec<GroupName> {
        crate::filter::editable_groups(
            &self.manageable_groups,
            &self.forbidden_groups,
            &self.admin_groups,
            requester_is_superuser,
        )
    }
}
