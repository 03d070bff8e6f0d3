//! Rank synchronization configuration.
//!
//! # Configuration
//!
//! - `MISSING_PERMISSION_POLICY`: What to do when a capability code has no
//!   permission record in the store. `skip` (default) logs a warning and
//!   carries on; `strict` fails the synchronization before anything is
//!   changed. Any other value is rejected.
//!
//! # Example
//!
//! ```ignore
//! use faculty_config::SyncConfig;
//!
//! let config = SyncConfig::from_env()?;
//! if config.missing_permission_policy.is_strict() {
//!     // surface configuration errors to the operator
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::database::ConfigError;
use std::str::FromStr;

/// Reaction to a capability code that is missing from the permission store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPermissionPolicy {
    /// Skip the code, log a warning and report it.
    #[default]
    Skip,
    /// Fail with a configuration error.
    Strict,
}

impl MissingPermissionPolicy {
    #[must_use]
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for MissingPermissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => f.write_str("skip"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for MissingPermissionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown missing permission policy: {other}")),
        }
    }
}

/// Settings for the rank synchronizer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    pub missing_permission_policy: MissingPermissionPolicy,
}

impl SyncConfig {
    /// Creates a new `SyncConfig` from environment variables.
    ///
    /// An unset policy uses the default; an unrecognised one is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing_permission_policy = match lookup("MISSING_PERMISSION_POLICY") {
            Some(value) if !value.trim().is_empty() => {
                value.parse::<MissingPermissionPolicy>().map_err(|_| ConfigError::Invalid {
                    key: "MISSING_PERMISSION_POLICY",
                    value,
                })?
            }
            _ => MissingPermissionPolicy::default(),
        };

        Ok(Self {
            missing_permission_policy,
        })
    }

    #[must_use]
    pub fn strict() -> Self {
        Self {
            missing_permission_policy: MissingPermissionPolicy::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(
            config.missing_permission_policy,
            MissingPermissionPolicy::Skip
        );
    }

    #[test]
    fn test_from_lookup_strict() {
        let config = SyncConfig::from_lookup(|key| {
            (key == "MISSING_PERMISSION_POLICY").then(|| "Strict".to_string())
        })
        .unwrap();
        assert!(config.missing_permission_policy.is_strict());
    }

    #[test]
    fn test_from_lookup_rejects_unknown_policy() {
        let err = SyncConfig::from_lookup(|_| Some("stirct".to_string())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "MISSING_PERMISSION_POLICY",
                value: "stirct".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "MISSING_PERMISSION_POLICY has an invalid value: stirct"
        );
    }

    #[test]
    fn test_from_lookup_missing_or_blank() {
        assert_eq!(SyncConfig::from_lookup(|_| None), Ok(SyncConfig::default()));
        assert_eq!(
            SyncConfig::from_lookup(|_| Some("  ".to_string())),
            Ok(SyncConfig::default())
        );
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!(
            " skip ".parse::<MissingPermissionPolicy>(),
            Ok(MissingPermissionPolicy::Skip)
        );
        assert!("lenient".parse::<MissingPermissionPolicy>().is_err());
        assert_eq!(MissingPermissionPolicy::Strict.to_string(), "strict");
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&MissingPermissionPolicy::Strict).unwrap();
        assert_eq!(json, r#""strict""#);
    }
}
