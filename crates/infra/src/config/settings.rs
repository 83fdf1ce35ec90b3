use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use groupmgr_auth::{ManagerConfig, PrincipalRef, Requester};
use groupmgr_core::{GroupName, UserName};

use super::{split_list, ConfigError, Directive};

const ENV_FORBIDDEN_GROUPS: &str = "GROUPMGR_FORBIDDEN_GROUPS";
const ENV_SUPERUSER: &str = "GROUPMGR_SUPERUSER";
const ENV_CONF_NAMESPACE: &str = "GROUPMGR_CONF_NAMESPACE";
const ENV_REQUIRE_CONF_NAMESPACE: &str = "GROUPMGR_REQUIRE_CONF_NAMESPACE";

/// Host-level settings shared by every manager instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Groups no manager instance may ever edit.
    pub forbidden_groups: Vec<GroupName>,

    /// The host's superuser list (`joe, @admin`). Its group entries are the
    /// admin groups.
    pub superuser: Vec<PrincipalRef>,

    /// Namespace holding configuration pages.
    pub conf_namespace: String,

    /// Ignore inline tag arguments and always read the configuration page.
    pub require_conf_namespace: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forbidden_groups: Vec::new(),
            superuser: Vec::new(),
            conf_namespace: "groupmgr".to_string(),
            require_conf_namespace: true,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Read settings from `GROUPMGR_*` environment variables, falling back to
    /// defaults for unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(ENV_FORBIDDEN_GROUPS) {
            settings.forbidden_groups = parse_env_list(ENV_FORBIDDEN_GROUPS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SUPERUSER) {
            settings.superuser = parse_env_list(ENV_SUPERUSER, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONF_NAMESPACE) {
            settings.conf_namespace = raw.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_REQUIRE_CONF_NAMESPACE) {
            settings.require_conf_namespace = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    return Err(ConfigError::Env {
                        var: ENV_REQUIRE_CONF_NAMESPACE.to_string(),
                        reason: format!("expected a boolean, got '{other}'"),
                    });
                }
            };
        }

        Ok(settings)
    }

    /// Group entries of the superuser list.
    pub fn admin_groups(&self) -> BTreeSet<GroupName> {
        self.superuser.iter().filter_map(|p| p.as_group()).cloned().collect()
    }

    pub fn is_superuser(&self, name: &UserName, groups: &BTreeSet<GroupName>) -> bool {
        self.superuser.iter().any(|p| match p {
            PrincipalRef::User(u) => u == name,
            PrincipalRef::Group(g) => groups.contains(g),
        })
    }

    /// Build the request context for an authenticated user.
    pub fn requester(&self, name: UserName, groups: BTreeSet<GroupName>) -> Requester {
        let is_superuser = self.is_superuser(&name, &groups);
        Requester {
            name,
            groups,
            is_superuser,
        }
    }

    /// Combine an inline directive with these settings.
    ///
    /// A placeholder carries no configuration and yields `MissingArguments`.
    pub fn manager_config(&self, directive: &Directive) -> Result<ManagerConfig, ConfigError> {
        let Directive::Inline { groups, managers } = directive else {
            return Err(ConfigError::MissingArguments);
        };

        Ok(ManagerConfig {
            manageable_groups: groups.clone(),
            managers: managers.clone(),
            forbidden_groups: self.forbidden_groups.iter().cloned().collect(),
            admin_groups: self.admin_groups(),
        })
    }
}

fn parse_env_list<T>(var: &str, raw: &str) -> Result<Vec<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    split_list(raw)
        .map(|item| {
            item.parse().map_err(|e: T::Err| ConfigError::Env {
                var: var.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
