//! Matcher configuration loaded from the environment.
//!
//! | variable | values | default |
//! |----------|--------|---------|
//! | `READYMATCH_MODE` | `lenient`, `strict`, `legacy` | `strict` |
//! | `READYMATCH_EXACT_FIRST_NAME` | boolean | `false` |
//! | `READYMATCH_PARALLEL` | boolean | `false` |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::matching::{find_matches, find_matches_parallel, MatchPolicy, SearchOutcome};
use crate::models::Candidate;

pub const MODE_VAR: &str = "READYMATCH_MODE";
pub const EXACT_FIRST_NAME_VAR: &str = "READYMATCH_EXACT_FIRST_NAME";
pub const PARALLEL_VAR: &str = "READYMATCH_PARALLEL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid match mode '{0}' (expected lenient, strict or legacy)")]
    InvalidMode(String),
    #[error("invalid boolean '{value}' for {key}")]
    InvalidBool { key: String, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Lenient,
    #[default]
    Strict,
    Legacy,
}

impl FromStr for MatchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(MatchMode::Lenient),
            "strict" => Ok(MatchMode::Strict),
            "legacy" => Ok(MatchMode::Legacy),
            _ => Err(ConfigError::InvalidMode(s.to_string())),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchMode::Lenient => "lenient",
            MatchMode::Strict => "strict",
            MatchMode::Legacy => "legacy",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    pub mode: MatchMode,
    /// Strict mode only: disallow nickname variations of the first name
    pub exact_first_name: bool,
    /// Classify candidates on the rayon pool
    pub parallel: bool,
}

impl MatcherConfig {
    /// Load `.env` (if present) and read the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mode = match lookup(MODE_VAR) {
            Some(value) => value.parse()?,
            None => defaults.mode,
        };
        let exact_first_name = match lookup(EXACT_FIRST_NAME_VAR) {
            Some(value) => parse_bool(EXACT_FIRST_NAME_VAR, &value)?,
            None => defaults.exact_first_name,
        };
        let parallel = match lookup(PARALLEL_VAR) {
            Some(value) => parse_bool(PARALLEL_VAR, &value)?,
            None => defaults.parallel,
        };

        Ok(Self {
            mode,
            exact_first_name,
            parallel,
        })
    }

    pub fn policy(&self) -> MatchPolicy {
        match self.mode {
            MatchMode::Lenient => MatchPolicy::Lenient,
            MatchMode::Strict => MatchPolicy::Strict {
                exact_first_name: self.exact_first_name,
            },
            MatchMode::Legacy => MatchPolicy::Legacy,
        }
    }

    /// Run the aggregator with this configuration.
    pub fn find_matches(&self, search_name: &str, candidates: &[Candidate]) -> SearchOutcome {
        if self.parallel {
            find_matches_parallel(search_name, candidates, self.policy())
        } else {
            find_matches(search_name, candidates, self.policy())
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MatcherConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, MatcherConfig::default());
        assert_eq!(config.policy(), MatchPolicy::Strict { exact_first_name: false });
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("Lenient".parse::<MatchMode>(), Ok(MatchMode::Lenient));
        assert_eq!(" legacy ".parse::<MatchMode>(), Ok(MatchMode::Legacy));
        assert_eq!(
            "fuzzy".parse::<MatchMode>(),
            Err(ConfigError::InvalidMode("fuzzy".to_string()))
        );
        assert_eq!(MatchMode::Strict.to_string(), "strict");
    }

    #[test]
    fn test_from_lookup() {
        let config = MatcherConfig::from_lookup(lookup_from(&[
            (MODE_VAR, "strict"),
            (EXACT_FIRST_NAME_VAR, "yes"),
            (PARALLEL_VAR, "1"),
        ]))
        .unwrap();

        assert!(config.parallel);
        assert_eq!(config.policy(), MatchPolicy::Strict { exact_first_name: true });
    }

    #[test]
    fn test_invalid_bool() {
        let err = MatcherConfig::from_lookup(lookup_from(&[(PARALLEL_VAR, "maybe")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid boolean 'maybe' for READYMATCH_PARALLEL");
    }

    #[test]
    fn test_config_runs_aggregator() {
        let candidates = vec![Candidate::new("TONY BEK"), Candidate::new("ANTHONY BEK")];

        let relaxed = MatcherConfig::default();
        assert_eq!(relaxed.find_matches("Anthony Bek", &candidates).matches.len(), 2);

        let exact = MatcherConfig {
            exact_first_name: true,
            parallel: true,
            ..Default::default()
        };
        let outcome = exact.find_matches("Anthony Bek", &candidates);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].name(), "ANTHONY BEK");
    }
}
