//! Forbidden and admin-group filtering of the manageable group list.

use std::collections::BTreeSet;

use groupmgr_core::GroupName;

/// Remove forbidden groups, and admin groups unless the requester is a
/// superuser, from `candidates`.
///
/// Order is preserved and nothing else is deduplicated: a candidate listed
/// twice that survives filtering appears twice.
///
/// - No IO
/// - No panics
pub fn editable_groups(
    candidates: &[GroupName],
    forbidden: &BTreeSet<GroupName>,
    admin: &BTreeSet<GroupName>,
    requester_is_superuser: bool,
) -> Vec<GroupName> {
    candidates
        .iter()
        .filter(|g| !forbidden.contains(*g))
        .filter(|g| requester_is_superuser || !admin.contains(*g))
        .cloned()
        .collect()
}
