//! Application configuration.
//!
//! `AppConfig` holds the runtime settings loaded from `.env` and environment variables:
//! where the forge lives, how to authenticate, where course files are read from and where
//! result files are written.

use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// Errors raised while loading configuration. All of them are fatal for a run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("failed to read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid course config {}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("assignment {assignment:?} not found in course {course:?}")]
    UnknownAssignment { course: String, assignment: String },

    #[error("none of {names:?} is a student or group of course {course:?}")]
    NoRosterMatch { course: String, names: Vec<String> },

    #[error("group {0:?} has no members")]
    EmptyGroup(String),

    #[error("pass threshold of assignment {assignment:?} is {percent}%, above 100%")]
    Threshold { assignment: String, percent: u32 },
}

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gitlab_url: String,
    pub gitlab_token: String,
    pub course_config_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Per-request timeout for forge calls. `None` waits indefinitely.
    pub forge_timeout: Option<Duration>,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` is this with `std::env::var`; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let gitlab_token = lookup("GITLAB_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::Missing("GITLAB_TOKEN"))?;

        let forge_timeout = match lookup("FORGE_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    key: "FORGE_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let log_to_stdout = match lookup("LOG_TO_STDOUT").as_deref().map(str::trim) {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_TO_STDOUT",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            gitlab_url: get("GITLAB_URL", "https://gitlab.com"),
            gitlab_token,
            course_config_dir: PathBuf::from(get("COURSE_CONFIG_DIR", ".")),
            output_dir: PathBuf::from(get("RESULTS_OUTPUT_DIR", ".")),
            forge_timeout,
            log_level: get("LOG_LEVEL", "results=info,forge=info,marker=info"),
            log_file: get("LOG_FILE", "results.log"),
            log_to_stdout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_token_only() {
        let cfg = AppConfig::from_lookup(lookup(&[("GITLAB_TOKEN", "glpat-123")])).unwrap();
        assert_eq!(cfg.gitlab_url, "https://gitlab.com");
        assert_eq!(cfg.gitlab_token, "glpat-123");
        assert_eq!(cfg.course_config_dir, PathBuf::from("."));
        assert_eq!(cfg.output_dir, PathBuf::from("."));
        assert_eq!(cfg.forge_timeout, None);
        assert!(!cfg.log_to_stdout);
    }

    #[test]
    fn test_missing_token_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("GITLAB_URL", "https://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GITLAB_TOKEN")));

        let err = AppConfig::from_lookup(lookup(&[("GITLAB_TOKEN", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GITLAB_TOKEN")));
    }

    #[test]
    fn test_overrides_are_read() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("GITLAB_TOKEN", "t"),
            ("GITLAB_URL", "https://gitlab.lrz.de"),
            ("COURSE_CONFIG_DIR", "/etc/courses"),
            ("RESULTS_OUTPUT_DIR", "out"),
            ("FORGE_TIMEOUT_SECS", "30"),
            ("LOG_TO_STDOUT", "true"),
        ]))
        .unwrap();
        assert_eq!(cfg.gitlab_url, "https://gitlab.lrz.de");
        assert_eq!(cfg.course_config_dir, PathBuf::from("/etc/courses"));
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
        assert_eq!(cfg.forge_timeout, Some(Duration::from_secs(30)));
        assert!(cfg.log_to_stdout);
    }

    #[test]
    fn test_zero_timeout_means_unbounded() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("GITLAB_TOKEN", "t"),
            ("FORGE_TIMEOUT_SECS", "0"),
        ]))
        .unwrap();
        assert_eq!(cfg.forge_timeout, None);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GITLAB_TOKEN", "t"),
            ("FORGE_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "FORGE_TIMEOUT_SECS",
                ..
            }
        ));

        let err = AppConfig::from_lookup(lookup(&[("GITLAB_TOKEN", "t"), ("LOG_TO_STDOUT", "yes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LOG_TO_STDOUT", .. }));
    }
}
