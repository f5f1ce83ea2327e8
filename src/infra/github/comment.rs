//! Tag listing and commit comments.

use serde::Deserialize;

use super::client::OctocrabClient;
use super::error::{GitHubError, Result};

/// Tags are fetched in pages of this size until the listing is exhausted.
pub const TAG_PAGE_SIZE: u8 = 100;

/// A tag and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoTag {
    pub name: String,
    pub sha: String,
}

/// Response of `POST /repos/{owner}/{repo}/commits/{sha}/comments`.
#[derive(Debug, Deserialize)]
struct CommitCommentResponse {
    html_url: String,
}

/// Trait for commit comment operations.
#[async_trait::async_trait]
pub trait CommentClient: Send + Sync {
    /// List every tag of a repository, following pagination to the end.
    async fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<RepoTag>>;

    /// Post a comment on a commit and return its URL.
    async fn create_commit_comment(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        body: &str,
    ) -> Result<String>;
}

#[async_trait::async_trait]
impl CommentClient for OctocrabClient {
    async fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<RepoTag>> {
        let mut page = self
            .client
            .repos(owner, repo)
            .list_tags()
            .per_page(TAG_PAGE_SIZE)
            .send()
            .await
            .map_err(GitHubError::from)?;

        let mut tags = Vec::new();
        let mut pages = 1usize;
        loop {
            tags.extend(std::mem::take(&mut page.items).into_iter().map(|tag| RepoTag {
                name: tag.name,
                sha: tag.commit.sha,
            }));

            match self
                .client
                .get_page::<octocrab::models::repos::Tag>(&page.next)
                .await
                .map_err(GitHubError::from)?
            {
                Some(next) => {
                    page = next;
                    pages += 1;
                }
                None => break,
            }
        }

        tracing::debug!(owner, repo, pages, count = tags.len(), "listed tags");
        Ok(tags)
    }

    async fn create_commit_comment(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        body: &str,
    ) -> Result<String> {
        // Use REST API: POST /repos/{owner}/{repo}/commits/{sha}/comments
        let route = format!("/repos/{owner}/{repo}/commits/{sha}/comments");
        let response: CommitCommentResponse = self
            .client
            .post(route, Some(&serde_json::json!({ "body": body })))
            .await
            .map_err(GitHubError::from)?;
        Ok(response.html_url)
    }
}
