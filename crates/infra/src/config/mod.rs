//! Configuration loading and representation.
//!
//! Host settings come from JSON or the environment; the per-page manager
//! configuration comes from a `~~GROUPMGR|...~~` directive, either inline or on
//! a configuration page.

mod directive;
mod resolver;
mod settings;

pub use directive::{Directive, TAG_PREFIX, TAG_SUFFIX};
pub use resolver::{config_page_id, ConfigResolver, PageSource};
pub use settings::Settings;

use thiserror::Error;

use groupmgr_auth::ManagerError;
use groupmgr_core::DomainError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The directive lacks the group list or the manager list.
    #[error("directive is missing its group or manager list")]
    MissingArguments,

    #[error("configuration page '{0}' not found")]
    PageNotFound(String),

    #[error("no group manager directive found")]
    NoDirective,

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid value for {var}: {reason}")]
    Env { var: String, reason: String },
}

impl From<DomainError> for ConfigError {
    fn from(value: DomainError) -> Self {
        ConfigError::Invalid(value.to_string())
    }
}

impl From<ConfigError> for ManagerError {
    fn from(_: ConfigError) -> Self {
        ManagerError::ConfigMissing
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}
