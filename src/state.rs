use crate::errors::Result;
use serde::Serialize;

/// One-line commits between the base ref and HEAD, newest first.
///
/// `NoCommits` is returned instead of an empty list so that "nothing to
/// show" stays distinct from a failed query, which is an `Err` upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CommitLog {
    NoCommits,
    Commits(Vec<String>),
}

impl CommitLog {
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            CommitLog::NoCommits
        } else {
            CommitLog::Commits(lines)
        }
    }

    pub fn first(&self) -> Option<&str> {
        self.lines().first().map(String::as_str)
    }

    pub fn lines(&self) -> &[String] {
        match self {
            CommitLog::NoCommits => &[],
            CommitLog::Commits(lines) => lines,
        }
    }
}

/// Snapshot of the branch being proposed. Recomputed on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoState {
    pub branch: String,
    pub has_unpushed_commits: bool,
    pub commit_log: CommitLog,
}

/// Read-only queries against the repository.
pub trait RepoStateReader {
    /// Name of the checked out branch, `HEAD` when detached.
    fn current_branch(&self) -> Result<String>;

    /// Whether HEAD has commits its upstream does not. A branch without an
    /// upstream has nothing to push.
    fn has_unpushed_commits(&self) -> Result<bool>;

    /// Commits reachable from HEAD but not from `base`.
    fn commits_since_base(&self, base: &str) -> Result<CommitLog>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lines_become_no_commits() {
        assert_eq!(CommitLog::from_lines(Vec::new()), CommitLog::NoCommits);
        assert_eq!(CommitLog::NoCommits.first(), None);
        assert!(CommitLog::NoCommits.lines().is_empty());
    }

    #[test]
    fn test_first_is_newest_line() {
        let log = CommitLog::from_lines(vec![
            "ab12cd3 Add widget".to_string(),
            "ef45gh6 Fix typo".to_string(),
        ]);
        assert_eq!(log.first(), Some("ab12cd3 Add widget"));
        assert_eq!(log.lines().len(), 2);
    }
}
