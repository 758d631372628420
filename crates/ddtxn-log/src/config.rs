//! Knobs that used to live in the benchmark scripts' global options.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which provenance keeps the name when an invocation flag and a result line
/// both define the same field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    #[default]
    PreferResult,
    PreferInvocation,
}

/// How a predicate treats a constrained field the record does not have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// The constraint does not apply; the record still matches.
    #[default]
    Pass,
    /// The record fails the match.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseConfig {
    /// Lines starting with this are comments.
    pub comment_prefix: String,
    /// Lines starting with this open a new run block.
    pub invocation_prefix: String,
    /// Known non-data header lines.
    pub ignored_prefixes: Vec<String>,
    /// Flags (without dashes) that never take a separate value token.
    pub boolean_flags: Vec<String>,
    pub collision: CollisionPolicy,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            comment_prefix: "# ".to_string(),
            invocation_prefix: "# ./".to_string(),
            ignored_prefixes: vec!["BKey".to_string()],
            boolean_flags: vec!["d".to_string(), "ck".to_string(), "conflicts".to_string()],
            collision: CollisionPolicy::default(),
        }
    }
}

impl ParseConfig {
    pub fn is_boolean_flag(&self, name: &str) -> bool {
        self.boolean_flags.iter().any(|f| f == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseConfig,
    pub missing_key: MissingKeyPolicy,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"missing_key": "reject", "parse": {"boolean_flags": []}}"#)
                .unwrap();
        assert_eq!(config.missing_key, MissingKeyPolicy::Reject);
        assert!(config.parse.boolean_flags.is_empty());
        assert_eq!(config.parse.invocation_prefix, "# ./");
        assert_eq!(config.parse.collision, CollisionPolicy::PreferResult);
    }

    #[test]
    fn load_reports_io_and_json_failures() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{\"missing_key\": ").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Json(_))));

        let valid = dir.path().join("valid.json");
        std::fs::write(&valid, r#"{"missing_key": "reject"}"#).unwrap();
        assert_eq!(
            Config::load(&valid).unwrap().missing_key,
            MissingKeyPolicy::Reject
        );
    }

    #[test]
    fn default_boolean_flags() {
        let config = ParseConfig::default();
        assert!(config.is_boolean_flag("ck"));
        assert!(!config.is_boolean_flag("nw"));
    }
}
