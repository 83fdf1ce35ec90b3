use groupmgr_auth::PrincipalRef;
use groupmgr_core::GroupName;

use super::{split_list, ConfigError};

pub const TAG_PREFIX: &str = "~~GROUPMGR";
pub const TAG_SUFFIX: &str = "~~";

/// A parsed `~~GROUPMGR~~` tag.
///
/// ```text
/// ~~GROUPMGR|posters|@moderators~~
/// ~~GROUPMGR|groupa, groupb|joe, @admin~~
/// ~~GROUPMGR~~
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// Bare tag: configuration lives on the configuration page.
    Placeholder,
    Inline {
        groups: Vec<GroupName>,
        managers: Vec<PrincipalRef>,
    },
}

impl Directive {
    /// Parse a complete tag, delimiters included.
    pub fn parse(tag: &str) -> Result<Self, ConfigError> {
        let tag = tag.trim();
        let body = tag
            .strip_prefix(TAG_PREFIX)
            .and_then(|rest| rest.strip_suffix(TAG_SUFFIX))
            .ok_or(ConfigError::NoDirective)?;

        if body.is_empty() {
            return Ok(Directive::Placeholder);
        }
        let args = body.strip_prefix('|').ok_or(ConfigError::NoDirective)?;
        Self::from_args(args)
    }

    /// Find the first argument-carrying tag in a page's text.
    ///
    /// Placeholder tags are skipped; a tag body may not contain `~`.
    pub fn find_in(text: &str) -> Result<Self, ConfigError> {
        let opener = format!("{TAG_PREFIX}|");
        let mut rest = text;
        while let Some(start) = rest.find(&opener) {
            let after = &rest[start + opener.len()..];
            if let Some(end) = after.find('~') {
                if after[end..].starts_with(TAG_SUFFIX) {
                    return Self::from_args(&after[..end]);
                }
            }
            rest = after;
        }
        Err(ConfigError::NoDirective)
    }

    fn from_args(args: &str) -> Result<Self, ConfigError> {
        let mut segments = args.split('|');
        let (Some(groups), Some(managers)) = (segments.next(), segments.next()) else {
            return Err(ConfigError::MissingArguments);
        };

        let groups = split_list(groups)
            .map(str::parse)
            .collect::<Result<Vec<GroupName>, _>>()?;
        // An entry that names nobody (a lone `@`) can never match; drop it.
        let managers = split_list(managers)
            .filter_map(|entry| match entry.parse::<PrincipalRef>() {
                Ok(principal) => Some(principal),
                Err(err) => {
                    tracing::warn!(entry, error = %err, "ignoring unusable manager entry");
                    None
                }
            })
            .collect();

        Ok(Directive::Inline { groups, managers })
    }
}
