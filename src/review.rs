use crate::errors::Result;
use crate::proposal::{Proposal, Section};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const HEADER: &str = "=== PR PROPOSAL ===";
pub const FOOTER: &str = "=== END PROPOSAL ===";

/// Render the proposal as the block shown to the reviewer.
///
/// Pure and byte-stable: identical inputs give identical output.
pub fn render(proposal: &Proposal, branch: &str, base: &str) -> String {
    format!(
        "{HEADER}\n\nBranch: {}\nBase: {}\n\nTitle:\n{}\n\nDescription:\n{}\n\n{FOOTER}\n",
        sanitize(branch),
        sanitize(base),
        sanitize(&proposal.title),
        sanitize(&proposal.description),
    )
}

#[derive(Debug, Serialize)]
struct ReviewDocument<'a> {
    branch: &'a str,
    base: &'a str,
    title: &'a str,
    description: &'a str,
    sections: &'a [Section],
    has_unpushed_commits: bool,
}

/// Machine-readable form of the review, for agents driving the tool.
pub fn render_json(
    proposal: &Proposal,
    branch: &str,
    base: &str,
    has_unpushed_commits: bool,
) -> Result<String> {
    let document = ReviewDocument {
        branch,
        base,
        title: &proposal.title,
        description: &proposal.description,
        sections: proposal.sections(),
        has_unpushed_commits,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn ansi_escape() -> &'static Regex {
    static ANSI: OnceLock<Regex> = OnceLock::new();
    ANSI.get_or_init(|| {
        Regex::new(r"\x1b(\[[0-?]*[ -/]*[@-~]|\][^\x07\x1b]*(\x07|\x1b\\)|[@-Z\\-_])")
            .expect("static regex is valid")
    })
}

/// Drop terminal escape sequences, control characters and bidirectional
/// formatting characters from text that came from outside, keeping newlines
/// and tabs.
fn sanitize(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    ansi_escape()
        .replace_all(&text, "")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .filter(|c| !is_bidi_control(*c))
        .collect()
}

/// Unicode bidirectional formatting characters (UAX #9).
fn is_bidi_control(c: char) -> bool {
    matches!(
        c,
        '\u{061C}' | '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}'
    )
}
