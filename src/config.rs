//! Runtime configuration for the CLI.
//!
//! Resolution order for each setting: command-line flag, then environment
//! variable, then built-in default.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::history::RestorePolicy;
use crate::utils::environment::{POLICY_ENV, get_store_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_path: PathBuf,
    pub restore_policy: RestorePolicy,
}

impl Config {
    /// Resolve configuration from the environment, letting `store_override` win
    pub fn resolve(store_override: Option<PathBuf>) -> Result<Self> {
        let store_path = match store_override {
            Some(path) => path,
            None => get_store_path().context("Failed to determine store location")?,
        };
        Self::from_parts(store_path, env::var(POLICY_ENV).ok().as_deref())
    }

    /// Build from an already-resolved store path and an optional policy name
    pub fn from_parts(store_path: PathBuf, policy: Option<&str>) -> Result<Self> {
        let restore_policy = match policy {
            Some(value) => value
                .parse::<RestorePolicy>()
                .map_err(|e: String| anyhow!(e))
                .with_context(|| format!("Invalid {}", POLICY_ENV))?,
            None => RestorePolicy::default(),
        };

        Ok(Self { store_path, restore_policy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_preserves() {
        let config = Config::from_parts(PathBuf::from("/tmp/store.json"), None).unwrap();
        assert_eq!(config.restore_policy, RestorePolicy::PreserveCurrent);
        assert_eq!(config.store_path, PathBuf::from("/tmp/store.json"));
    }

    #[test]
    fn test_policy_from_value() {
        let config = Config::from_parts(PathBuf::from("s.json"), Some("overwrite")).unwrap();
        assert_eq!(config.restore_policy, RestorePolicy::Overwrite);
    }

    #[test]
    fn test_invalid_policy_names_variable() {
        let err = Config::from_parts(PathBuf::from("s.json"), Some("sometimes")).unwrap_err();
        assert!(format!("{:#}", err).contains("MESSAGE_HISTORY_POLICY"));
    }
}
