use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use groupmgr_auth::{DirectoryError, UserDirectory, UserRecord};
use groupmgr_core::{GroupName, UserName};

/// In-memory user directory.
///
/// Intended for tests/dev. Writes are atomic per call; individual users can be
/// made to reject writes and the whole directory can be taken offline.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: RwLock<Vec<UserRecord>>,
    read_only: RwLock<BTreeSet<UserName>>,
    offline: AtomicBool,
    writes: AtomicUsize,
}

impl InMemoryDirectory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users: RwLock::new(users),
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Make every future write for `user` fail.
    pub fn reject_writes_for(&self, user: impl Into<UserName>) -> Result<(), DirectoryError> {
        self.read_only
            .write()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?
            .insert(user.into());
        Ok(())
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn user(&self, name: &UserName) -> Option<UserRecord> {
        let users = self.users.read().ok()?;
        users.iter().find(|u| &u.name == name).cloned()
    }

    /// Number of successful `set_groups` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), DirectoryError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DirectoryError::Unavailable("directory is offline".to_string()));
        }
        Ok(())
    }
}

impl UserDirectory for InMemoryDirectory {
    fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        self.ensure_online()?;
        let users = self
            .users
            .read()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?;
        Ok(users.clone())
    }

    fn set_groups(&self, user: &UserName, groups: &BTreeSet<GroupName>) -> Result<(), DirectoryError> {
        self.ensure_online()?;

        let rejected = self
            .read_only
            .read()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?
            .contains(user);
        if rejected {
            return Err(DirectoryError::Rejected {
                user: user.clone(),
                reason: "user is read-only".to_string(),
            });
        }

        let mut users = self
            .users
            .write()
            .map_err(|_| DirectoryError::Unavailable("lock poisoned".to_string()))?;
        let record = users
            .iter_mut()
            .find(|u| &u.name == user)
            .ok_or_else(|| DirectoryError::UnknownUser(user.clone()))?;

        record.groups = groups.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
