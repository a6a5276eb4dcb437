use crate::errors::{OpenerError, Result};
use crate::github::types::PullRequestRequest;
use crate::process;
use std::path::PathBuf;
use std::time::Duration;

pub trait GitHubCli {
    fn is_available(&self) -> Result<bool>;
    /// Open the pull request and return what the facility reports, usually its URL.
    fn create_pr(&self, request: &PullRequestRequest) -> Result<String>;
}

pub struct GitHubCliImpl {
    workdir: PathBuf,
    timeout: Duration,
}

impl GitHubCliImpl {
    pub fn new(workdir: PathBuf, timeout: Duration) -> Self {
        Self { workdir, timeout }
    }

    fn run_command(&self, args: &[&str]) -> Result<std::process::Output> {
        process::run("gh", args, &self.workdir, self.timeout).map_err(|e| match e {
            OpenerError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                OpenerError::GitHubCliNotFound
            }
            OpenerError::Io(io) => {
                OpenerError::PrCreation(format!("Failed to execute gh command: {}", io))
            }
            other => other,
        })
    }
}

/// Arguments for `gh pr create`. Each value is its own argument, so titles
/// and bodies reach gh untouched whatever characters they contain.
pub fn create_args(request: &PullRequestRequest) -> Vec<&str> {
    let mut args = vec!["pr", "create"];
    if request.draft {
        args.push("--draft");
    }
    args.extend([
        "--title",
        request.title.as_str(),
        "--body",
        request.body.as_str(),
        "--base",
        request.base.as_str(),
        "--head",
        request.head.as_str(),
    ]);
    args
}

impl GitHubCli for GitHubCliImpl {
    fn is_available(&self) -> Result<bool> {
        match self.run_command(&["--version"]) {
            Ok(output) => Ok(output.status.success()),
            Err(OpenerError::GitHubCliNotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn create_pr(&self, request: &PullRequestRequest) -> Result<String> {
        log::info!(
            "Creating PR: {} → {} (\"{}\")",
            request.head,
            request.base,
            request.title
        );

        let output = self.run_command(&create_args(request))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OpenerError::PrCreation(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let result = if !stdout.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            format!("Created PR for {}", request.head)
        };

        log::info!("✅ {}", result);
        Ok(result)
    }
}

#[cfg(test)]
pub struct MockGitHubCli {
    pub available: bool,
    pub fail_with: Option<String>,
    pub calls: crate::git::mock::CallLog,
    pub created_prs: std::sync::Mutex<Vec<PullRequestRequest>>,
}

#[cfg(test)]
impl MockGitHubCli {
    pub fn new(calls: crate::git::mock::CallLog) -> Self {
        Self {
            available: true,
            fail_with: None,
            calls,
            created_prs: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn set_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    pub fn failing(mut self, stderr: &str) -> Self {
        self.fail_with = Some(stderr.to_string());
        self
    }

    pub fn get_created_prs(&self) -> Vec<PullRequestRequest> {
        self.created_prs.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl GitHubCli for MockGitHubCli {
    fn is_available(&self) -> Result<bool> {
        Ok(self.available)
    }

    fn create_pr(&self, request: &PullRequestRequest) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create_pr {}", request.head));
        if let Some(stderr) = &self.fail_with {
            return Err(OpenerError::PrCreation(stderr.clone()));
        }
        self.created_prs.lock().unwrap().push(request.clone());
        Ok(format!("https://github.com/acme/widgets/pull/{}", self.get_created_prs().len()))
    }
}
