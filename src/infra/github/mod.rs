//! GitHub API client module using octocrab.
//!
//! Provides OctocrabClient for the REST calls the pipeline makes:
//! opening pull requests, replacing labels, listing tags and commenting on commits.

mod client;
mod comment;
pub(crate) mod error;
#[cfg(test)]
pub(crate) mod mock;
mod pr;
mod reference;

pub use client::OctocrabClient;
pub use comment::CommentClient;
pub use error::GitHubError;
pub use pr::{CreatePrParams, CreatedPr, PrClient};
pub use reference::{CommitComment, comment_on_ref};
