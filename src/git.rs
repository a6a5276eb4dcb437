use crate::{
    config::Config,
    errors::{OpenerError, Result},
    process,
    state::{CommitLog, RepoStateReader},
};
use git2::{BranchType, ErrorCode, Repository, Sort};
use std::path::{Path, PathBuf};

/// Pushes the current branch to its remote.
pub trait BranchPusher {
    /// `git push -u <remote> HEAD`
    fn push_current_branch(&self, remote: &str) -> Result<()>;
}

impl<T: BranchPusher + ?Sized> BranchPusher for &T {
    fn push_current_branch(&self, remote: &str) -> Result<()> {
        (**self).push_current_branch(remote)
    }
}

pub struct Git {
    pub repository: Repository,
    pub config: Config,
}

impl Git {
    /// Open the repository containing `path` and load its `pr-opener` configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repository = Repository::discover(path)?;
        let config = Config::from_git(&repository.config()?)?;
        Ok(Self { repository, config })
    }

    /// Working directory of the repository, where external commands run.
    pub fn workdir(&self) -> Result<PathBuf> {
        self.repository
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| OpenerError::VcsQuery("repository has no working directory".into()))
    }

    fn abbreviated(&self, commit: &git2::Commit) -> Result<String> {
        let short = commit.as_object().short_id()?;
        Ok(short.as_str().unwrap_or_default().to_string())
    }
}

impl RepoStateReader for Git {
    fn current_branch(&self) -> Result<String> {
        match self.repository.head() {
            Ok(head) if head.is_branch() => head
                .shorthand()
                .map(str::to_string)
                .ok_or_else(|| OpenerError::VcsQuery("branch name is not valid UTF-8".into())),
            Ok(_) => Ok("HEAD".to_string()),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                // No commits yet: HEAD still names the branch it will create.
                let head = self.repository.find_reference("HEAD")?;
                head.symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(str::to_string)
                    .ok_or_else(|| OpenerError::VcsQuery("cannot resolve unborn HEAD".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn has_unpushed_commits(&self) -> Result<bool> {
        let branch_name = self.current_branch()?;
        if branch_name == "HEAD" {
            log::debug!("Detached HEAD, nothing to push");
            return Ok(false);
        }

        let branch = match self.repository.find_branch(&branch_name, BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let upstream = match branch.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == ErrorCode::NotFound => {
                log::debug!("No upstream configured for {}, nothing to push", branch_name);
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        let local = branch.get().peel_to_commit()?.id();
        let remote = upstream.get().peel_to_commit()?.id();
        let (ahead, behind) = self.repository.graph_ahead_behind(local, remote)?;
        log::debug!("{} is {} ahead and {} behind its upstream", branch_name, ahead, behind);

        Ok(ahead > 0)
    }

    fn commits_since_base(&self, base: &str) -> Result<CommitLog> {
        let base_commit = self
            .repository
            .revparse_single(base)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| OpenerError::VcsQuery(format!("cannot resolve '{}': {}", base, e.message())))?;

        let mut revwalk = self.repository.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;
        revwalk.hide(base_commit.id())?;

        let mut lines = Vec::new();
        for oid in revwalk {
            let commit = self.repository.find_commit(oid?)?;
            let summary = String::from_utf8_lossy(commit.summary_bytes().unwrap_or_default());
            lines.push(format!("{} {}", self.abbreviated(&commit)?, summary));
        }

        log::debug!("{} commit(s) since {}", lines.len(), base);
        Ok(CommitLog::from_lines(lines))
    }
}

impl BranchPusher for Git {
    fn push_current_branch(&self, remote: &str) -> Result<()> {
        let workdir = self.workdir()?;
        let output = process::run(
            "git",
            &["push", "-u", remote, "HEAD"],
            &workdir,
            self.config.timeout,
        )
        .map_err(|e| match e {
            OpenerError::Io(io) => OpenerError::Push(format!("failed to execute git: {}", io)),
            other => other,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OpenerError::Push(stderr.trim().to_string()));
        }
        Ok(())
    }
}
