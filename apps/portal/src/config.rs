//! Portal configuration.

use std::env;
use std::path::PathBuf;

use portal_store::StorePolicy;

/// Directory used when `PORTAL_DATA_DIR` is not set.
pub const DEFAULT_DATA_DIR: &str = ".portal-data";

/// Portal configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding persisted state.
    pub data_dir: PathBuf,
    /// Whether state is written to `data_dir` at all.
    pub persist: bool,
    /// Clear the signed-in identity when a browsing session starts.
    pub clear_session_on_start: bool,
    /// Domain rules for the stores.
    pub policy: StorePolicy,
    /// Log level.
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let flag = |key: &str, default: bool| -> anyhow::Result<bool> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => parse_flag(&value).ok_or_else(|| {
                    anyhow::anyhow!("{key} must be true/false/1/0, got {value:?}")
                }),
            }
        };

        let defaults = StorePolicy::default();
        let policy = StorePolicy {
            deduplicate_registrations: flag(
                "PORTAL_DEDUPLICATE_REGISTRATIONS",
                defaults.deduplicate_registrations,
            )?,
            enforce_capacity: flag("PORTAL_ENFORCE_CAPACITY", defaults.enforce_capacity)?,
            strict_status_transitions: flag(
                "PORTAL_STRICT_STATUS_TRANSITIONS",
                defaults.strict_status_transitions,
            )?,
        };

        Ok(Self {
            data_dir: lookup("PORTAL_DATA_DIR")
                .filter(|dir| !dir.is_empty())
                .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                .into(),
            persist: flag("PORTAL_PERSIST", true)?,
            clear_session_on_start: flag("PORTAL_CLEAR_SESSION_ON_START", true)?,
            policy,
            log_level: lookup("PORTAL_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert!(config.persist);
        assert!(config.clear_session_on_start);
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.policy, StorePolicy::default());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORTAL_DATA_DIR", "/var/lib/portal"),
            ("PORTAL_PERSIST", "0"),
            ("PORTAL_DEDUPLICATE_REGISTRATIONS", "false"),
            ("PORTAL_STRICT_STATUS_TRANSITIONS", "FALSE"),
            ("PORTAL_LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert!(!config.persist);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/portal"));
        assert!(!config.policy.deduplicate_registrations);
        assert!(config.policy.enforce_capacity);
        assert!(!config.policy.strict_status_transitions);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_flag() {
        let err = config_from(&[("PORTAL_ENFORCE_CAPACITY", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("PORTAL_ENFORCE_CAPACITY"));
    }
}
