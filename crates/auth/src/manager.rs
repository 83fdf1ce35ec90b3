//! One evaluation cycle of the group manager.
//!
//! Sequence:
//!
//! 1. Evaluate the requester against the manager list (deny short-circuits).
//! 2. Filter the manageable groups down to the editable ones.
//! 3. For every submitted user row, stage each editable group's desired state
//!    unless the cell is locked.
//! 4. Commit one write per changed user and aggregate the outcome.
//! 5. Describe the post-update matrix for rendering.

use serde::Serialize;

use groupmgr_core::{GroupName, UserName};

use crate::{
    evaluate, is_locked, Authorization, ManagerConfig, ManagerError, MembershipDiff,
    MutationResult, Requester, ToggleBatch, UpdateOutcome, UserDirectory, UserRecord,
};

/// One checkbox in the rendered matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub group: GroupName,
    pub checked: bool,
    pub locked: bool,
}

/// One user row in the rendered matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub name: UserName,
    pub full_name: String,
    pub email: String,
    pub cells: Vec<Cell>,
}

impl UserRow {
    pub fn cell(&self, group: &GroupName) -> Option<&Cell> {
        self.cells.iter().find(|c| &c.group == group)
    }
}

/// Render-agnostic result of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerView {
    pub editable_groups: Vec<GroupName>,
    pub authorization: Authorization,
    pub rows: Vec<UserRow>,
    pub outcome: UpdateOutcome,
    /// Users whose write was rejected this cycle, in row order.
    pub failed_users: Vec<UserName>,
}

impl ManagerView {
    pub fn row(&self, user: &UserName) -> Option<&UserRow> {
        self.rows.iter().find(|r| &r.name == user)
    }
}

/// Group manager bound to a user directory.
///
/// Holds no per-cycle state; one instance can serve concurrent cycles.
#[derive(Debug, Clone)]
pub struct GroupManager<D> {
    directory: D,
}

impl<D> GroupManager<D>
where
    D: UserDirectory,
{
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Run a cycle against a fresh user listing from the directory.
    pub fn run(
        &self,
        config: &ManagerConfig,
        requester: &Requester,
        toggles: &ToggleBatch,
    ) -> Result<ManagerView, ManagerError> {
        let authorization = authorize(config, requester)?;

        let users = self.directory.list_users().map_err(|err| {
            tracing::warn!(error = %err, "cannot list users");
            ManagerError::DirectoryUnavailable(err.to_string())
        })?;

        Ok(self.cycle(config, requester, authorization, users, toggles))
    }

    /// Run a cycle against a user snapshot the caller already fetched.
    pub fn run_with_users(
        &self,
        config: &ManagerConfig,
        requester: &Requester,
        users: Vec<UserRecord>,
        toggles: &ToggleBatch,
    ) -> Result<ManagerView, ManagerError> {
        let authorization = authorize(config, requester)?;
        Ok(self.cycle(config, requester, authorization, users, toggles))
    }

    fn cycle(
        &self,
        config: &ManagerConfig,
        requester: &Requester,
        authorization: Authorization,
        mut users: Vec<UserRecord>,
        toggles: &ToggleBatch,
    ) -> ManagerView {
        let editable_groups = config.editable_groups(requester.is_superuser);
        let authorizing_group = authorization.authorizing_group.as_ref();

        let mut outcome = UpdateOutcome::NoChange;
        let mut failed_users = Vec::new();

        for user in users.iter_mut().filter(|u| toggles.contains_row(&u.name)) {
            let mut diff = MembershipDiff::for_user(user);
            for group in &editable_groups {
                let locked = is_locked(group, requester, user, &config.admin_groups, authorizing_group);
                let desired = toggles.desired(&user.name, group).unwrap_or(false);
                if locked {
                    tracing::debug!(user = %user.name, group = %group, "cell locked; toggle ignored");
                }
                diff.stage(group, desired, locked);
            }

            let result = diff.commit(user, &self.directory);
            if result == MutationResult::Failed {
                failed_users.push(user.name.clone());
            }
            outcome = outcome.record(result);
        }

        let rows = users
            .into_iter()
            .map(|user| {
                let cells = editable_groups
                    .iter()
                    .map(|group| Cell {
                        group: group.clone(),
                        checked: user.is_member(group),
                        locked: is_locked(group, requester, &user, &config.admin_groups, authorizing_group),
                    })
                    .collect();
                UserRow {
                    name: user.name,
                    full_name: user.full_name,
                    email: user.email,
                    cells,
                }
            })
            .collect();

        tracing::info!(
            requester = %requester.name,
            outcome = ?outcome,
            failed = failed_users.len(),
            "group manager cycle complete"
        );

        ManagerView {
            editable_groups,
            authorization,
            rows,
            outcome,
            failed_users,
        }
    }
}

fn authorize(config: &ManagerConfig, requester: &Requester) -> Result<Authorization, ManagerError> {
    let authorization = evaluate(&config.managers, requester);
    if !authorization.authorized {
        tracing::warn!(requester = %requester.name, "group manager access denied");
        return Err(ManagerError::NotAuthorized);
    }
    Ok(authorization)
}
