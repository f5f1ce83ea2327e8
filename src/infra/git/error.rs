//! Git error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to clone {url} at {reference}")]
    Clone {
        url: String,
        reference: String,
        source: git2::Error,
    },

    #[error("Failed to create branch {branch}")]
    CreateBranch { branch: String, source: git2::Error },

    #[error("Failed to check out branch {branch}")]
    Checkout { branch: String, source: git2::Error },

    #[error("Failed to stage working tree changes")]
    Stage(#[source] git2::Error),

    #[error("Failed to create commit")]
    Commit(#[source] git2::Error),

    #[error("Failed to push {refspec} to origin")]
    Push { refspec: String, source: git2::Error },

    #[error("Remote rejected {reference}: {reason}")]
    PushRejected { reference: String, reason: String },
}

pub type Result<T> = anyhow::Result<T>;
