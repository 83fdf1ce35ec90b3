//! `groupmgr-auth`: the group manager's decision-and-diff engine.
//!
//! Given who is asking, which groups may be managed and by whom, and a batch of
//! checkbox states, this crate decides what the requester may see and edit and
//! computes the minimal set of membership writes.
//!
//! This crate is intentionally decoupled from markup, HTTP and storage. The user
//! directory is injected through [`UserDirectory`].

pub mod authorize;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod lock;
pub mod manager;
pub mod membership;
pub mod principal;
pub mod toggles;
pub mod user;

pub use authorize::{evaluate, Authorization, Grant};
pub use config::ManagerConfig;
pub use directory::{DirectoryError, UserDirectory};
pub use error::ManagerError;
pub use filter::editable_groups;
pub use lock::is_locked;
pub use manager::{Cell, GroupManager, ManagerView, UserRow};
pub use membership::{apply, MembershipDiff, MutationResult, UpdateOutcome};
pub use principal::{PrincipalRef, Requester, GROUP_MARKER};
pub use toggles::ToggleBatch;
pub use user::UserRecord;

pub use groupmgr_core::{GroupName, UserName};
