use crate::state::{CommitLog, RepoState};
use serde::Serialize;

/// Hard cap on the title length, in characters.
pub const MAX_TITLE_CHARS: usize = 72;
/// How much of the summary is used when no commit can name the PR.
pub const SUMMARY_TITLE_CHARS: usize = 60;
pub const PLACEHOLDER_TITLE: &str = "Work in progress";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proposal {
    pub title: String,
    pub description: String,
    /// Sections emitted into `description`, in order.
    pub sections: Vec<Section>,
}

/// Description sections, in the order they are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    PrTemplate,
    Changes,
}

impl Section {
    pub fn heading(self) -> &'static str {
        match self {
            Section::Summary => "## Summary",
            Section::PrTemplate => "## PR Template",
            Section::Changes => "## Changes",
        }
    }
}

impl Proposal {
    /// Combine the branch state, the repository template and the free-text
    /// summary of the work into a title and description.
    pub fn build(state: &RepoState, template: Option<&str>, summary: Option<&str>) -> Self {
        let summary = summary.map(str::trim).filter(|s| !s.is_empty());
        let template = template.filter(|t| !t.trim().is_empty());

        let title = derive_title(&state.commit_log, summary);
        let (description, sections) = describe(&state.commit_log, template, summary);

        Proposal {
            title,
            description,
            sections,
        }
    }

    /// Replace the title, keeping the length cap.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = truncate_chars(title.trim(), MAX_TITLE_CHARS);
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

fn derive_title(log: &CommitLog, summary: Option<&str>) -> String {
    let candidate = match (log.first(), summary) {
        (Some(first), _) => strip_hash(first).to_string(),
        (None, Some(summary)) => {
            let flattened = summary.split_whitespace().collect::<Vec<_>>().join(" ");
            truncate_chars(&flattened, SUMMARY_TITLE_CHARS)
        }
        (None, None) => PLACEHOLDER_TITLE.to_string(),
    };
    truncate_chars(&candidate, MAX_TITLE_CHARS)
}

/// `ab12cd3 Add widget` -> `Add widget`. A line without a space is kept whole.
fn strip_hash(line: &str) -> &str {
    line.split_once(' ').map(|(_, rest)| rest).unwrap_or(line)
}

fn describe(
    log: &CommitLog,
    template: Option<&str>,
    summary: Option<&str>,
) -> (String, Vec<Section>) {
    let mut blocks = Vec::new();
    let mut sections = Vec::new();

    if let Some(summary) = summary {
        blocks.push(format!("{}\n{}", Section::Summary.heading(), summary));
        sections.push(Section::Summary);
    }
    if let Some(template) = template {
        blocks.push(format!(
            "{}\n{}",
            Section::PrTemplate.heading(),
            template.trim_end_matches(['\r', '\n'])
        ));
        sections.push(Section::PrTemplate);
    }
    if let CommitLog::Commits(lines) = log {
        blocks.push(format!(
            "{}\n\n```\n{}\n```",
            Section::Changes.heading(),
            lines.join("\n")
        ));
        sections.push(Section::Changes);
    }

    (blocks.join("\n\n"), sections)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
