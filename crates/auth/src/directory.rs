use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use groupmgr_core::{GroupName, UserName};

use crate::UserRecord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("user directory unavailable: {0}")]
    Unavailable(String),

    #[error("unknown user '{0}'")]
    UnknownUser(UserName),

    #[error("directory rejected update for '{user}': {reason}")]
    Rejected { user: UserName, reason: String },
}

/// The user store the manager reads from and writes to.
///
/// Implementations must make `set_groups` atomic per call: a failed call
/// leaves the user's memberships exactly as they were. Two concurrent writes
/// for the same user may race (last writer wins); the manager does not
/// serialize them.
pub trait UserDirectory: Send + Sync {
    /// All users with their current memberships, in a stable order.
    fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError>;

    /// Replace `user`'s group set with `groups`.
    fn set_groups(&self, user: &UserName, groups: &BTreeSet<GroupName>) -> Result<(), DirectoryError>;
}

impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        (**self).list_users()
    }

    fn set_groups(&self, user: &UserName, groups: &BTreeSet<GroupName>) -> Result<(), DirectoryError> {
        (**self).set_groups(user, groups)
    }
}

impl<D> UserDirectory for &D
where
    D: UserDirectory + ?Sized,
{
    fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        (**self).list_users()
    }

    fn set_groups(&self, user: &UserName, groups: &BTreeSet<GroupName>) -> Result<(), DirectoryError> {
        (**self).set_groups(user, groups)
    }
}
