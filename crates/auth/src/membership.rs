//! Membership diffing and application.
//!
//! Desired checkbox states are staged per user into a [`MembershipDiff`]; a
//! diff with changes is committed as a single directory write. Nothing is
//! written when the desired state already matches.

use std::collections::BTreeSet;

use serde::Serialize;

use groupmgr_core::{GroupName, UserName};

use crate::{UserDirectory, UserRecord};

/// What happened to one staged change set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationResult {
    /// Nothing to write (locked, or already in the desired state).
    Skipped,
    Applied,
    Failed,
}

/// Aggregate status of one evaluation cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
    #[default]
    NoChange,
    /// At least one write succeeded and none failed.
    PartialSuccess,
    /// At least one write failed.
    Failure,
}

impl UpdateOutcome {
    /// Fold one more result into the outcome. Failure is sticky.
    pub fn record(self, result: MutationResult) -> Self {
        match (self, result) {
            (UpdateOutcome::Failure, _) | (_, MutationResult::Failed) => UpdateOutcome::Failure,
            (_, MutationResult::Applied) => UpdateOutcome::PartialSuccess,
            (outcome, MutationResult::Skipped) => outcome,
        }
    }

    pub fn aggregate<I>(results: I) -> Self
    where
        I: IntoIterator<Item = MutationResult>,
    {
        results.into_iter().fold(Self::default(), Self::record)
    }
}

/// Staged membership changes for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipDiff {
    user: UserName,
    current: BTreeSet<GroupName>,
    next: BTreeSet<GroupName>,
}

impl MembershipDiff {
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            user: user.name.clone(),
            current: user.groups.clone(),
            next: user.groups.clone(),
        }
    }

    /// Stage the desired membership of `group`.
    ///
    /// Returns `true` if this changed the staged state. Locked cells and
    /// desired states that already hold are ignored.
    pub fn stage(&mut self, group: &GroupName, desired: bool, locked: bool) -> bool {
        if locked || self.next.contains(group) == desired {
            return false;
        }
        if desired {
            self.next.insert(group.clone());
        } else {
            self.next.remove(group);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.current == self.next
    }

    pub fn added(&self) -> impl Iterator<Item = &GroupName> {
        self.next.difference(&self.current)
    }

    pub fn removed(&self) -> impl Iterator<Item = &GroupName> {
        self.current.difference(&self.next)
    }

    /// Write the staged set through `directory` in one call.
    ///
    /// On success `user.groups` is replaced by the staged set; on failure it
    /// is left untouched.
    pub fn commit<D>(self, user: &mut UserRecord, directory: &D) -> MutationResult
    where
        D: UserDirectory + ?Sized,
    {
        debug_assert_eq!(user.name, self.user);

        if self.is_empty() {
            return MutationResult::Skipped;
        }

        match directory.set_groups(&self.user, &self.next) {
            Ok(()) => {
                tracing::info!(
                    user = %self.user,
                    added = ?self.added().collect::<Vec<_>>(),
                    removed = ?self.removed().collect::<Vec<_>>(),
                    "updated group memberships"
                );
                user.groups = self.next;
                MutationResult::Applied
            }
            Err(err) => {
                tracing::warn!(user = %self.user, error = %err, "group membership update failed");
                MutationResult::Failed
            }
        }
    }
}

/// Apply one desired checkbox state for one user.
///
/// Prefer staging every cell of a row into a [`MembershipDiff`] so the user
/// gets a single write.
pub fn apply<D>(
    directory: &D,
    user: &mut UserRecord,
    group: &GroupName,
    desired: bool,
    locked: bool,
) -> MutationResult
where
    D: UserDirectory + ?Sized,
{
    let mut diff = MembershipDiff::for_user(user);
    diff.stage(group, desired, locked);
    diff.commit(user, directory)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::DirectoryError;

    #[derive(Default)]
    struct RecordingDirectory {
        writes: Mutex<Vec<(UserName, BTreeSet<GroupName>)>>,
        fail: bool,
    }

    impl UserDirectory for RecordingDirectory {
        fn list_users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
            Ok(vec![])
        }

        fn set_groups(&self, user: &UserName, groups: &BTreeSet<GroupName>) -> Result<(), DirectoryError> {
            if self.fail {
                return Err(DirectoryError::Rejected {
                    user: user.clone(),
                    reason: "backend refused".to_string(),
                });
            }
            self.writes.lock().unwrap().push((user.clone(), groups.clone()));
            Ok(())
        }
    }

    fn g(name: &'static str) -> GroupName {
        GroupName::new(name)
    }

    #[test]
    fn adding_a_group_applies_and_updates_record() {
        let dir = RecordingDirectory::default();
        let mut joe = UserRecord::new("joe");

        assert_eq!(apply(&dir, &mut joe, &g("editors"), true, false), MutationResult::Applied);
        assert!(joe.is_member(&g("editors")));
        assert_eq!(dir.writes.lock().unwrap().len(), 1);
    }

    #[test]
    fn repeating_the_same_desired_state_is_skipped() {
        let dir = RecordingDirectory::default();
        let mut joe = UserRecord::new("joe");

        apply(&dir, &mut joe, &g("editors"), true, false);
        assert_eq!(apply(&dir, &mut joe, &g("editors"), true, false), MutationResult::Skipped);
        assert_eq!(dir.writes.lock().unwrap().len(), 1);
    }

    #[test]
    fn locked_cell_is_skipped() {
        let dir = RecordingDirectory::default();
        let mut joe = UserRecord::new("joe").with_groups(["moderators"]);

        assert_eq!(apply(&dir, &mut joe, &g("moderators"), false, true), MutationResult::Skipped);
        assert!(joe.is_member(&g("moderators")));
        assert!(dir.writes.lock().unwrap().is_empty());
    }

    #[test]
    fn failed_write_leaves_record_unchanged() {
        let dir = RecordingDirectory {
            fail: true,
            ..Default::default()
        };
        let mut joe = UserRecord::new("joe").with_groups(["posters"]);

        assert_eq!(apply(&dir, &mut joe, &g("posters"), false, false), MutationResult::Failed);
        assert!(joe.is_member(&g("posters")));
    }

    #[test]
    fn staged_changes_are_coalesced_into_one_write() {
        let dir = RecordingDirectory::default();
        let mut joe = UserRecord::new("joe").with_groups(["posters"]);

        let mut diff = MembershipDiff::for_user(&joe);
        assert!(diff.stage(&g("posters"), false, false));
        assert!(diff.stage(&g("editors"), true, false));
        assert!(!diff.stage(&g("readers"), false, false));
        assert_eq!(diff.added().cloned().collect::<Vec<_>>(), vec![g("editors")]);
        assert_eq!(diff.removed().cloned().collect::<Vec<_>>(), vec![g("posters")]);

        assert_eq!(diff.commit(&mut joe, &dir), MutationResult::Applied);

        let writes = dir.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, [g("editors")].into_iter().collect());
    }

    #[test]
    fn staging_a_change_and_reverting_it_writes_nothing() {
        let dir = RecordingDirectory::default();
        let mut joe = UserRecord::new("joe");

        let mut diff = MembershipDiff::for_user(&joe);
        diff.stage(&g("editors"), true, false);
        diff.stage(&g("editors"), false, false);

        assert!(diff.is_empty());
        assert_eq!(diff.commit(&mut joe, &dir), MutationResult::Skipped);
    }

    #[test]
    fn outcome_aggregation() {
        use MutationResult::*;

        assert_eq!(UpdateOutcome::aggregate([]), UpdateOutcome::NoChange);
        assert_eq!(UpdateOutcome::aggregate([Skipped, Skipped]), UpdateOutcome::NoChange);
        assert_eq!(UpdateOutcome::aggregate([Skipped, Applied]), UpdateOutcome::PartialSuccess);
        assert_eq!(UpdateOutcome::aggregate([Applied, Failed, Applied]), UpdateOutcome::Failure);
        assert_eq!(UpdateOutcome::aggregate([Failed, Skipped]), UpdateOutcome::Failure);
    }
}
