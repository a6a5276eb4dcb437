use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenerError {
    #[error("Git query failed: {0}")]
    VcsQuery(String),

    #[error("Push failed: {0}")]
    Push(String),

    #[error("Pull request creation failed: {0}")]
    PrCreation(String),

    #[error("GitHub CLI not found")]
    GitHubCliNotFound,

    #[error("`{command}` timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    #[error("Cannot open a pull request from the base branch '{0}'")]
    OnBaseBranch(String),

    #[error("Invalid workflow transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: crate::core::Stage,
        to: crate::core::Stage,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<git2::Error> for OpenerError {
    fn from(error: git2::Error) -> Self {
        OpenerError::VcsQuery(error.message().to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpenerError>;
