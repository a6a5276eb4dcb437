pub mod open;
pub mod propose;

use crate::{
    config::Config,
    core::{Prepared, Workflow},
    errors::Result,
    git::Git,
    review,
    template::TemplateLocator,
};
use clap::{Args, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by every command that builds a proposal.
#[derive(Debug, Args)]
pub struct ProposalArgs {
    /// Free-text summary of the work done
    #[arg(long, conflicts_with = "summary_file")]
    pub summary: Option<String>,

    /// Read the summary from a file, `-` for stdin
    #[arg(long)]
    pub summary_file: Option<PathBuf>,

    /// Branch the pull request targets [git config: pr-opener.baseBranch]
    #[arg(long)]
    pub base: Option<String>,

    /// Remote to compare against and push to [git config: pr-opener.remote]
    #[arg(long)]
    pub remote: Option<String>,

    /// Seconds allowed for each external command [git config: pr-opener.timeout]
    #[arg(long)]
    pub timeout: Option<u64>,

    /// How to print the proposal
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ProposalArgs {
    pub fn config(&self, loaded: Config) -> Result<Config> {
        loaded.with_overrides(self.base.as_deref(), self.remote.as_deref(), self.timeout)
    }

    pub fn summary(&self) -> Result<Option<String>> {
        if let Some(summary) = &self.summary {
            return Ok(Some(summary.clone()));
        }
        match &self.summary_file {
            Some(path) if path.as_os_str() == "-" => {
                let mut summary = String::new();
                std::io::stdin().read_to_string(&mut summary)?;
                Ok(Some(summary))
            }
            Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}

/// Run the read-only half of the workflow and print the review.
pub(crate) fn prepare_and_show(
    workflow: &mut Workflow<'_, Git>,
    args: &ProposalArgs,
    title: Option<&str>,
) -> Result<Prepared> {
    let summary = args.summary()?;
    let mut prepared = workflow.prepare(summary.as_deref())?;
    if let Some(title) = title {
        prepared.proposal = prepared.proposal.with_title(title);
    }

    match args.format {
        OutputFormat::Text => println!("{}", prepared.review()),
        OutputFormat::Json => println!(
            "{}",
            review::render_json(
                &prepared.proposal,
                &prepared.state.branch,
                &prepared.base_label,
                prepared.state.has_unpushed_commits,
            )?
        ),
    }

    Ok(prepared)
}

pub(crate) fn locator_for(git: &Git) -> Result<TemplateLocator> {
    Ok(TemplateLocator::new(git.workdir()?))
}
