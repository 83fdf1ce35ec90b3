use thiserror::Error;

/// Why a cycle produced no editable surface.
///
/// Individual write failures are not errors at this level; they surface as
/// [`crate::UpdateOutcome::Failure`] on an otherwise rendered view.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManagerError {
    /// No usable configuration (no tag arguments and no configuration page).
    #[error("no group manager configuration found")]
    ConfigMissing,

    /// The requester matched no manager entry and is not a superuser.
    #[error("not authorized to manage groups")]
    NotAuthorized,

    /// Listing users failed.
    #[error("user directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

impl ManagerError {
    /// True when the host should render nothing at all, as opposed to a
    /// denial message.
    pub fn renders_nothing(&self) -> bool {
        matches!(self, ManagerError::ConfigMissing | ManagerError::DirectoryUnavailable(_))
    }
}
