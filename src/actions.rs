use crate::{
    errors::{OpenerError, Result},
    git::BranchPusher,
    github::{GitHubCli, PullRequestRequest},
    state::RepoState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    Pushed,
    AlreadyPushed,
}

/// The mutating half of the workflow. Only reached after approval.
pub struct ActionRunner<P: BranchPusher, G: GitHubCli> {
    pub pusher: P,
    pub github_cli: G,
    remote: String,
}

impl<P: BranchPusher, G: GitHubCli> ActionRunner<P, G> {
    pub fn new(pusher: P, github_cli: G, remote: &str) -> Self {
        Self {
            pusher,
            github_cli,
            remote: remote.to_string(),
        }
    }

    /// Fail early when gh is missing, before anything has been pushed.
    pub fn ensure_ready(&self) -> Result<()> {
        if !self.github_cli.is_available()? {
            log::error!("📝 GitHub CLI (gh) not found. Install it from https://cli.github.com/");
            return Err(OpenerError::GitHubCliNotFound);
        }
        Ok(())
    }

    pub fn push_if_needed(&self, state: &RepoState) -> Result<PushOutcome> {
        if !state.has_unpushed_commits {
            println!("Code already pushed.");
            return Ok(PushOutcome::AlreadyPushed);
        }

        println!("Pushing commits...");
        log::info!("pushing {}:{}", self.remote, state.branch);
        self.pusher.push_current_branch(&self.remote)?;
        println!("Pushed successfully.");
        Ok(PushOutcome::Pushed)
    }

    /// Open a draft pull request of `branch` onto `base`.
    pub fn open_pr(&self, title: &str, description: &str, branch: &str, base: &str) -> Result<String> {
        let request = PullRequestRequest {
            title: title.to_string(),
            body: description.to_string(),
            base: base.to_string(),
            head: branch.to_string(),
            draft: true,
        };

        println!("\nOpening PR with gh...");
        match self.github_cli.create_pr(&request) {
            Ok(url) => {
                println!("PR created successfully!");
                Ok(url)
            }
            Err(e) => {
                log::error!("❌ Failed to create PR for {}: {}", branch, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{CallLog, MockPusher};
    use crate::github::cli::MockGitHubCli;
    use crate::state::CommitLog;
    use std::sync::{Arc, Mutex};

    fn state(unpushed: bool) -> RepoState {
        RepoState {
            branch: "feature/x".to_string(),
            has_unpushed_commits: unpushed,
            commit_log: CommitLog::from_lines(vec!["ab12cd3 Add widget".to_string()]),
        }
    }

    fn runner(calls: &CallLog) -> ActionRunner<MockPusher, MockGitHubCli> {
        ActionRunner::new(
            MockPusher::new(calls.clone()),
            MockGitHubCli::new(calls.clone()),
            "origin",
        )
    }

    #[test]
    fn test_push_skipped_when_nothing_to_push() {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let runner = runner(&calls);

        assert_eq!(runner.push_if_needed(&state(false)).unwrap(), PushOutcome::AlreadyPushed);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_push_when_ahead() {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let runner = runner(&calls);

        assert_eq!(runner.push_if_needed(&state(true)).unwrap(), PushOutcome::Pushed);
        assert_eq!(*calls.lock().unwrap(), vec!["push origin".to_string()]);
    }

    #[test]
    fn test_push_failure_is_propagated() {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let runner = ActionRunner::new(
            MockPusher::new(calls.clone()).failing("rejected: non-fast-forward"),
            MockGitHubCli::new(calls.clone()),
            "origin",
        );

        let result = runner.push_if_needed(&state(true));
        assert!(matches!(result, Err(OpenerError::Push(ref e)) if e.contains("non-fast-forward")));
    }

    #[test]
    fn test_open_pr_requests_a_draft() {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let runner = runner(&calls);

        let url = runner
            .open_pr("Add widget", "## Summary\nAdded widget support", "feature/x", "main")
            .unwrap();

        assert_eq!(url, "https://github.com/acme/widgets/pull/1");
        let created = runner.github_cli.get_created_prs();
        assert_eq!(created.len(), 1);
        assert!(created[0].draft);
        assert_eq!(created[0].base, "main");
        assert_eq!(created[0].head, "feature/x");
        assert_eq!(created[0].title, "Add widget");
    }

    #[test]
    fn test_open_pr_failure() {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let runner = ActionRunner::new(
            MockPusher::new(calls.clone()),
            MockGitHubCli::new(calls.clone()).failing("already exists"),
            "origin",
        );

        let result = runner.open_pr("Add widget", "", "feature/x", "main");
        assert!(matches!(result, Err(OpenerError::PrCreation(_))));
    }

    #[test]
    fn test_missing_gh_is_detected_up_front() {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let runner = ActionRunner::new(
            MockPusher::new(calls.clone()),
            MockGitHubCli::new(calls.clone()).set_available(false),
            "origin",
        );

        assert!(matches!(runner.ensure_ready(), Err(OpenerError::GitHubCliNotFound)));
        assert!(calls.lock().unwrap().is_empty());
    }
}
