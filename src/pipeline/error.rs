//! Pipeline error types.

use thiserror::Error;

use crate::config_doc::KeyPathError;

/// Invalid or missing parameters, detected before anything touches the network.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--{0} is required")]
    Missing(&'static str),

    #[error("--configname and --vipersearch must be non-empty when --custom is set")]
    NoTargets,

    #[error("--configname has {documents} entries but --vipersearch has {keys}")]
    TargetCountMismatch { documents: usize, keys: usize },

    #[error(transparent)]
    InvalidKey(#[from] KeyPathError),

    #[error("Either --updateimage or --updateversion must be enabled")]
    NoUpdateMode,
}

/// The step a run stopped in. Attached as context to the underlying error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Failed to stage {branch}")]
    Stage { branch: String },

    #[error("Failed to update config documents")]
    Mutate,

    #[error("Failed to commit and push {branch}")]
    Commit { branch: String },

    #[error("Failed to open pull request from {head} into {base}")]
    PullRequest { head: String, base: String },

    #[error("Failed to label pull request #{number}")]
    Label { number: u64 },

    #[error("Failed to comment on {reference}")]
    Comment { reference: String },
}

pub type Result<T> = anyhow::Result<T>;
