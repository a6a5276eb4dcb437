use crate::{
    actions::ActionRunner,
    commands::{locator_for, prepare_and_show, ProposalArgs},
    core::{Decision, Outcome, Workflow},
    errors::Result,
    git::Git,
    github::GitHubCliImpl,
};
use clap::Args;

/// Build the proposal, then act on the reviewer's decision
#[derive(Debug, Args)]
pub struct Open {
    #[command(flatten)]
    pub proposal: ProposalArgs,

    /// Reviewer's decision; only `approved` pushes and creates the draft PR
    #[arg(long, value_enum, default_value_t = Decision::Pending)]
    pub decision: Decision,

    /// Use this title instead of the derived one
    #[arg(long)]
    pub title: Option<String>,
}

impl Open {
    pub fn execute(&self, mut git: Git) -> Result<()> {
        git.config = self.proposal.config(git.config.clone())?;
        let locator = locator_for(&git)?;

        let mut workflow = Workflow::new(&git, &locator, &git.config);
        let prepared = prepare_and_show(&mut workflow, &self.proposal, self.title.as_deref())?;

        let github_cli = GitHubCliImpl::new(git.workdir()?, git.config.timeout);
        let runner = ActionRunner::new(&git, github_cli, &git.config.remote);

        match workflow.conclude(&prepared, self.decision, &runner)? {
            Outcome::AwaitingReview => {
                println!("Awaiting review: rerun with --decision approved to push and open a draft PR.");
            }
            Outcome::Rejected => {
                println!("Proposal rejected. Nothing was pushed or created.");
            }
            Outcome::PrOpened { url, pushed } => {
                if !pushed {
                    log::debug!("{} was already up to date on the remote", prepared.state.branch);
                }
                println!("{}", url);
            }
        }
        log::debug!("Finished at {:?}", workflow.stage());

        Ok(())
    }
}
