//! Git operations using git2 (libgit2).
//!
//! Cloning, branching, committing and pushing all go through libgit2
//! without spawning external git processes.

mod auth;
mod commit;
mod error;
mod github;
mod stage;
#[cfg(test)]
pub mod test_utils;

pub use auth::GitAuth;
pub use commit::{CommitAuthor, commit_and_push};
pub use error::GitError;
pub use github::clone_url;
pub use stage::{StagedRepo, stage};
