//! Resolve a commit-or-tag reference and comment on the commit.

use lazy_regex::regex_is_match;

use super::comment::CommentClient;
use super::error::{GitHubError, Result};

/// A caller-supplied reference, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitRef {
    /// 5–40 lowercase hex characters, used as a commit SHA directly.
    Sha(String),
    /// Anything else, looked up in the repository's tags.
    Tag(String),
}

impl CommitRef {
    pub fn classify(reference: &str) -> Self {
        if regex_is_match!(r"^[0-9a-f]{5,40}$", reference) {
            Self::Sha(reference.to_string())
        } else {
            Self::Tag(reference.to_string())
        }
    }
}

/// A comment that was posted on a resolved commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitComment {
    pub sha: String,
    pub url: String,
}

/// Resolve `reference` to a commit SHA.
///
/// A tag that does not exist is an error; nothing is posted for it.
pub async fn resolve<C: CommentClient + ?Sized>(
    client: &C,
    owner: &str,
    repo: &str,
    reference: &str,
) -> Result<String> {
    match CommitRef::classify(reference) {
        CommitRef::Sha(sha) => Ok(sha),
        CommitRef::Tag(tag) => {
            let tags = client.list_tags(owner, repo).await?;
            tags.into_iter()
                .find(|t| t.name == tag)
                .map(|t| t.sha)
                .ok_or_else(|| {
                    GitHubError::TagNotFound {
                        owner: owner.to_string(),
                        repo: repo.to_string(),
                        tag,
                    }
                    .into()
                })
        }
    }
}

/// Resolve `reference` and post `body` as a comment on that commit.
pub async fn comment_on_ref<C: CommentClient + ?Sized>(
    client: &C,
    owner: &str,
    repo: &str,
    reference: &str,
    body: &str,
) -> Result<CommitComment> {
    let sha = resolve(client, owner, repo, reference).await?;
    tracing::info!(reference, sha, "resolved commit reference");

    let url = client.create_commit_comment(owner, repo, &sha, body).await?;
    tracing::info!(url, "posted commit comment");
    Ok(CommitComment { sha, url })
}
