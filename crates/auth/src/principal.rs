use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use groupmgr_core::{DomainError, GroupName, UserName, ValueObject};

/// Marker prefix that distinguishes group references from user names in
/// textual principal lists (`joe, @admin`).
pub const GROUP_MARKER: char = '@';

/// A user or a group, as named in manager, superuser and similar lists.
///
/// Parsing is the only place the `@` marker is interpreted; everything past
/// that compares tagged variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PrincipalRef {
    User(UserName),
    Group(GroupName),
}

impl PrincipalRef {
    pub fn user(name: impl Into<UserName>) -> Self {
        Self::User(name.into())
    }

    pub fn group(name: impl Into<GroupName>) -> Self {
        Self::Group(name.into())
    }

    pub fn as_group(&self) -> Option<&GroupName> {
        match self {
            PrincipalRef::Group(g) => Some(g),
            PrincipalRef::User(_) => None,
        }
    }
}

impl core::fmt::Display for PrincipalRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PrincipalRef::User(u) => f.write_str(u.as_str()),
            PrincipalRef::Group(g) => write!(f, "{GROUP_MARKER}{g}"),
        }
    }
}

impl FromStr for PrincipalRef {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.strip_prefix(GROUP_MARKER) {
            Some(group) => Ok(Self::Group(group.parse()?)),
            None => Ok(Self::User(trimmed.parse()?)),
        }
    }
}

impl TryFrom<String> for PrincipalRef {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PrincipalRef> for String {
    fn from(value: PrincipalRef) -> Self {
        value.to_string()
    }
}

impl ValueObject for PrincipalRef {}

/// The principal asking to view or update the manager in this cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub name: UserName,
    #[serde(default)]
    pub groups: BTreeSet<GroupName>,
    #[serde(default)]
    pub is_superuser: bool,
}

impl Requester {
    pub fn new(name: impl Into<UserName>) -> Self {
        Self {
            name: name.into(),
            groups: BTreeSet::new(),
            is_superuser: false,
        }
    }

    pub fn with_groups<I, G>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<GroupName>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }

    /// Everything the requester can be matched as: their own name plus one
    /// group reference per membership.
    pub fn credentials(&self) -> HashSet<PrincipalRef> {
        std::iter::once(PrincipalRef::User(self.name.clone()))
            .chain(self.groups.iter().cloned().map(PrincipalRef::Group))
            .collect()
    }
}
