use crate::{
    commands::{locator_for, prepare_and_show, ProposalArgs},
    core::Workflow,
    errors::Result,
    git::Git,
};
use clap::Args;

/// Show the proposed pull request without pushing or creating anything
#[derive(Debug, Args)]
pub struct Propose {
    #[command(flatten)]
    pub proposal: ProposalArgs,
}

impl Propose {
    pub fn execute(&self, mut git: Git) -> Result<()> {
        git.config = self.proposal.config(git.config.clone())?;
        let locator = locator_for(&git)?;

        let mut workflow = Workflow::new(&git, &locator, &git.config);
        prepare_and_show(&mut workflow, &self.proposal, None)?;

        Ok(())
    }
}
