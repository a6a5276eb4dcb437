use crate::{
    actions::{ActionRunner, PushOutcome},
    config::Config,
    errors::{OpenerError, Result},
    git::BranchPusher,
    github::GitHubCli,
    proposal::Proposal,
    review,
    state::{RepoState, RepoStateReader},
    template::TemplateLocator,
};
use clap::ValueEnum;

/// Where a run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    BranchChecked,
    ContextGathered,
    ProposalBuilt,
    AwaitingReview,
    Approved,
    Pushed,
    PrOpened,
    Rejected,
}

impl Stage {
    pub fn can_advance_to(self, next: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, next),
            (Idle, BranchChecked)
                | (BranchChecked, ContextGathered)
                | (ContextGathered, ProposalBuilt)
                | (ProposalBuilt, AwaitingReview)
                | (AwaitingReview, Approved)
                | (AwaitingReview, Rejected)
                | (Approved, Pushed)
                | (Pushed, PrOpened)
                | (Rejected, Idle)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::PrOpened | Stage::Rejected)
    }
}

/// The reviewer's verdict on a proposal. Always supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Decision {
    Pending,
    Approved,
    Rejected,
}

/// Result of the read-only half of a run.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub state: RepoState,
    pub proposal: Proposal,
    /// Label of the base, e.g. `origin/main`.
    pub base_label: String,
}

impl Prepared {
    pub fn review(&self) -> String {
        review::render(&self.proposal, &self.state.branch, &self.base_label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    AwaitingReview,
    Rejected,
    PrOpened { url: String, pushed: bool },
}

pub struct Workflow<'a, R: RepoStateReader> {
    reader: &'a R,
    locator: &'a TemplateLocator,
    config: &'a Config,
    stage: Stage,
}

impl<'a, R: RepoStateReader> Workflow<'a, R> {
    pub fn new(reader: &'a R, locator: &'a TemplateLocator, config: &'a Config) -> Self {
        Self {
            reader,
            locator,
            config,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, next: Stage) -> Result<()> {
        if !self.stage.can_advance_to(next) {
            return Err(OpenerError::InvalidTransition {
                from: self.stage,
                to: next,
            });
        }
        log::debug!("{:?} -> {:?}", self.stage, next);
        self.stage = next;
        if next.is_terminal() {
            log::info!("Run finished: {:?}", next);
        }
        Ok(())
    }

    /// Gather context and build the proposal. Nothing is mutated here.
    ///
    /// Running from the base branch aborts before the commit log is queried.
    pub fn prepare(&mut self, summary: Option<&str>) -> Result<Prepared> {
        if self.stage == Stage::Rejected {
            self.advance(Stage::Idle)?;
        }

        let branch = self.reader.current_branch()?;
        if branch == self.config.base_branch {
            log::error!("Refusing to open a pull request from {}", branch);
            return Err(OpenerError::OnBaseBranch(branch));
        }
        self.advance(Stage::BranchChecked)?;

        let base_label = self.config.base_ref();
        let state = RepoState {
            has_unpushed_commits: self.reader.has_unpushed_commits()?,
            commit_log: self.reader.commits_since_base(&base_label)?,
            branch,
        };
        let template = self.locator.find();
        self.advance(Stage::ContextGathered)?;

        let proposal = Proposal::build(&state, template.as_deref(), summary);
        self.advance(Stage::ProposalBuilt)?;

        self.advance(Stage::AwaitingReview)?;
        Ok(Prepared {
            state,
            proposal,
            base_label,
        })
    }

    /// Act on the reviewer's decision. Only `Approved` reaches the runner;
    /// push always completes before the pull request is created.
    pub fn conclude<P: BranchPusher, G: GitHubCli>(
        &mut self,
        prepared: &Prepared,
        decision: Decision,
        runner: &ActionRunner<P, G>,
    ) -> Result<Outcome> {
        if self.stage != Stage::AwaitingReview {
            return Err(OpenerError::InvalidTransition {
                from: self.stage,
                to: match decision {
                    Decision::Rejected => Stage::Rejected,
                    _ => Stage::Approved,
                },
            });
        }

        match decision {
            Decision::Pending => Ok(Outcome::AwaitingReview),
            Decision::Rejected => {
                self.advance(Stage::Rejected)?;
                log::info!("Proposal for {} rejected", prepared.state.branch);
                Ok(Outcome::Rejected)
            }
            Decision::Approved => {
                self.advance(Stage::Approved)?;
                runner.ensure_ready()?;

                let pushed = runner.push_if_needed(&prepared.state)? == PushOutcome::Pushed;
                self.advance(Stage::Pushed)?;

                let url = runner.open_pr(
                    &prepared.proposal.title,
                    &prepared.proposal.description,
                    &prepared.state.branch,
                    &self.config.base_branch,
                )?;
                self.advance(Stage::PrOpened)?;

                Ok(Outcome::PrOpened { url, pushed })
            }
        }
    }
}
