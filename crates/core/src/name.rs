//! Strongly-typed names used across the domain.
//!
//! Users and groups are identified by opaque, case-sensitive strings. They are
//! kept as distinct types so a user name can never be compared to a group name
//! by accident. Names are trimmed and checked for blanks both when parsed and
//! when deserialized; [`GroupName::new`] and [`UserName::new`] take them as-is.

use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Name of a group whose membership can be managed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupName(Cow<'static, str>);

/// Login name of a user in the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(Cow<'static, str>);

macro_rules! impl_name_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a name as-is (no trimming, no validation).
            pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $t {
            fn from(value: &'static str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        /// Parses a trimmed, non-blank name.
        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> DomainResult<Self> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::validation(concat!($name, " cannot be empty")));
                }
                Ok(Self::new(trimmed.to_string()))
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }

        impl ValueObject for $t {}
    };
}

impl_name_newtype!(GroupName, "group name");
impl_name_newtype!(UserName, "user name");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let g: GroupName = "  posters ".parse().unwrap();
        assert_eq!(g.as_str(), "posters");
    }

    #[test]
    fn parse_rejects_blank_names() {
        let err = "   ".parse::<UserName>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(err.to_string().contains("user name"));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_ne!(GroupName::new("Admin"), GroupName::new("admin"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&GroupName::new("editors")).unwrap();
        assert_eq!(json, "\"editors\"");

        let back: UserName = serde_json::from_str("\"joe\"").unwrap();
        assert_eq!(back, UserName::new("joe"));
    }

    #[test]
    fn deserializing_applies_the_parse_rules() {
        let trimmed: Vec<GroupName> = serde_json::from_str(r#"[" secret", "posters "]"#).unwrap();
        assert_eq!(trimmed, vec![GroupName::new("secret"), GroupName::new("posters")]);

        let err = serde_json::from_str::<UserName>("\"  \"").unwrap_err();
        assert!(err.to_string().contains("user name cannot be empty"));
    }

    #[test]
    fn map_keys_are_validated_too() {
        use std::collections::BTreeMap;

        let map: BTreeMap<UserName, bool> = serde_json::from_str(r#"{" joe ": true}"#).unwrap();
        assert!(map.contains_key(&UserName::new("joe")));
        assert!(serde_json::from_str::<BTreeMap<UserName, bool>>(r#"{"": true}"#).is_err());
    }
}
