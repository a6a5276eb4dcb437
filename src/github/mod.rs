pub mod cli;
pub mod types;

#[cfg(test)]
mod tests;

pub use cli::{GitHubCli, GitHubCliImpl};
pub use types::PullRequestRequest;
