use serde::Serialize;

use groupmgr_core::GroupName;

use crate::{PrincipalRef, Requester};

/// Why a requester was let in (or not).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "principal")]
pub enum Grant {
    /// Matched a manager entry (the last matching entry in list order).
    Manager(PrincipalRef),
    /// Matched no manager entry but is a superuser.
    Superuser,
    Denied,
}

/// Result of evaluating a requester against the manager list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authorization {
    pub authorized: bool,

    /// The manager group membership that qualified the requester, if any.
    ///
    /// Computed for superusers as well, since it drives self-lockout
    /// protection.
    pub authorizing_group: Option<GroupName>,

    pub grant: Grant,
}

/// Decide whether `requester` may operate the manager.
///
/// Every manager entry is checked in order against the requester's
/// credentials. When several group entries match, the last one becomes the
/// authorizing group.
///
/// - No IO
/// - No panics
pub fn evaluate(managers: &[PrincipalRef], requester: &Requester) -> Authorization {
    let credentials = requester.credentials();

    let mut matched: Option<&PrincipalRef> = None;
    let mut authorizing_group = None;
    for manager in managers {
        if credentials.contains(manager) {
            matched = Some(manager);
            if let Some(group) = manager.as_group() {
                authorizing_group = Some(group.clone());
            }
        }
    }

    let grant = match (matched, requester.is_superuser) {
        (Some(m), _) => Grant::Manager(m.clone()),
        (None, true) => Grant::Superuser,
        (None, false) => Grant::Denied,
    };

    tracing::debug!(
        requester = %requester.name,
        superuser = requester.is_superuser,
        authorizing_group = ?authorizing_group,
        "evaluated manager access"
    );

    Authorization {
        authorized: !matches!(grant, Grant::Denied),
        authorizing_group,
        grant,
    }
}
