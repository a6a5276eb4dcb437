use crate::errors::{OpenerError, Result};
use std::time::Duration;

pub const DEFAULT_BASE_BRANCH: &str = "main";
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// One day.
pub const MAX_TIMEOUT_SECS: u64 = 24 * 60 * 60;

const BASE_BRANCH_KEY: &str = "pr-opener.baseBranch";
const REMOTE_KEY: &str = "pr-opener.remote";
const TIMEOUT_KEY: &str = "pr-opener.timeout";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Branch the pull request targets. Opening a PR from it is refused.
    pub base_branch: String,
    pub remote: String,
    /// Upper bound for every external process.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_branch: DEFAULT_BASE_BRANCH.to_string(),
            remote: DEFAULT_REMOTE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read the `pr-opener` section of the git configuration, falling back
    /// to defaults for anything unset.
    pub fn from_git(git_config: &git2::Config) -> Result<Self> {
        let mut config = Config::default();

        if let Some(base) = optional_string(git_config, BASE_BRANCH_KEY)? {
            config.base_branch = base;
        }
        if let Some(remote) = optional_string(git_config, REMOTE_KEY)? {
            config.remote = remote;
        }
        if let Some(timeout) = optional_string(git_config, TIMEOUT_KEY)? {
            config.timeout = parse_timeout(&timeout)?;
        }

        log::debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Apply command line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        base_branch: Option<&str>,
        remote: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        if let Some(base) = base_branch {
            self.base_branch = non_empty(base, "base branch")?;
        }
        if let Some(remote) = remote {
            self.remote = non_empty(remote, "remote")?;
        }
        if let Some(secs) = timeout_secs {
            self.timeout = timeout_from_secs(secs)?;
        }
        Ok(self)
    }

    /// Remote-tracking ref the commit log is measured against, e.g. `origin/main`.
    pub fn base_ref(&self) -> String {
        format!("{}/{}", self.remote, self.base_branch)
    }
}

fn optional_string(git_config: &git2::Config, key: &str) -> Result<Option<String>> {
    match git_config.get_string(key) {
        Ok(value) => Ok(Some(non_empty(&value, key)?)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(OpenerError::Config(format!("{}: {}", key, e.message()))),
    }
}

fn non_empty(value: &str, what: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(OpenerError::Config(format!("{} must not be empty", what)));
    }
    Ok(value.to_string())
}

fn parse_timeout(value: &str) -> Result<Duration> {
    let secs = value.trim().parse::<u64>().map_err(|_| {
        OpenerError::Config(format!(
            "{} must be a number of seconds, got '{}'",
            TIMEOUT_KEY, value
        ))
    })?;
    timeout_from_secs(secs)
}

fn timeout_from_secs(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(OpenerError::Config(
            "timeout must be at least one second".to_string(),
        ));
    }
    if secs > MAX_TIMEOUT_SECS {
        return Err(OpenerError::Config(format!(
            "timeout must be at most {} seconds, got {}",
            MAX_TIMEOUT_SECS, secs
        )));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn git_config_with(entries: &[(&str, &str)]) -> (tempfile::TempDir, git2::Config) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "").unwrap();
        let mut config = git2::Config::open(&path).unwrap();
        for (key, value) in entries {
            config.set_str(key, value).unwrap();
        }
        (dir, config)
    }

    #[test]
    fn test_defaults_when_section_missing() {
        let (_dir, git_config) = git_config_with(&[]);
        let config = Config::from_git(&git_config).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_ref(), "origin/main");
    }

    #[test]
    fn test_reads_pr_opener_section() {
        let (_dir, git_config) = git_config_with(&[
            ("pr-opener.baseBranch", "develop"),
            ("pr-opener.remote", "upstream"),
            ("pr-opener.timeout", "30"),
        ]);
        let config = Config::from_git(&git_config).unwrap();
        assert_eq!(config.base_branch, "develop");
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.base_ref(), "upstream/develop");
    }

    #[test]
    fn test_rejects_bad_timeout() {
        let (_dir, git_config) = git_config_with(&[("pr-opener.timeout", "soon")]);
        assert!(matches!(
            Config::from_git(&git_config),
            Err(OpenerError::Config(_))
        ));

        let (_dir, git_config) = git_config_with(&[("pr-opener.timeout", "0")]);
        assert!(matches!(
            Config::from_git(&git_config),
            Err(OpenerError::Config(_))
        ));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::default()
            .with_overrides(Some("trunk"), None, Some(5))
            .unwrap();
        assert_eq!(config.base_branch, "trunk");
        assert_eq!(config.remote, "origin");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_oversized_timeout_is_rejected() {
        let result = Config::default().with_overrides(None, None, Some(u64::MAX));
        assert!(matches!(result, Err(OpenerError::Config(_))));

        let (_dir, git_config) =
            git_config_with(&[("pr-opener.timeout", "18446744073709551615")]);
        assert!(matches!(
            Config::from_git(&git_config),
            Err(OpenerError::Config(_))
        ));

        let config = Config::default()
            .with_overrides(None, None, Some(MAX_TIMEOUT_SECS))
            .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(MAX_TIMEOUT_SECS));
    }

    #[test]
    fn test_empty_override_is_rejected() {
        let result = Config::default().with_overrides(Some("  "), None, None);
        assert!(matches!(result, Err(OpenerError::Config(_))));
    }
}
