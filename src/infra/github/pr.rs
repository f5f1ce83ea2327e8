//! Pull request operations.

use super::client::OctocrabClient;
use super::error::{GitHubError, Result};

/// Parameters for creating a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrParams {
    pub owner: String,
    pub repo: String,
    pub title: String,
    pub body: String,
    /// Branch the changes live on.
    pub head: String,
    /// Branch the PR merges into.
    pub base: String,
    /// Label that replaces every label on the PR when set.
    pub auto_merge_label: Option<String>,
}

/// A pull request that exists on the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPr {
    pub number: u64,
    pub url: String,
}

/// Trait for pull request operations.
#[async_trait::async_trait]
pub trait PrClient: Send + Sync {
    /// Create a pull request.
    async fn create_pull_request(&self, params: &CreatePrParams) -> Result<CreatedPr>;

    /// Replace the full label set of an issue/PR. Returns the resulting label names.
    async fn replace_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<String>>;
}

#[async_trait::async_trait]
impl PrClient for OctocrabClient {
    async fn create_pull_request(&self, params: &CreatePrParams) -> Result<CreatedPr> {
        let pr = self
            .client
            .pulls(&params.owner, &params.repo)
            .create(&params.title, &params.head, &params.base)
            .body(&params.body)
            .send()
            .await
            .map_err(GitHubError::from)?;

        let url = pr
            .html_url
            .map(|u| u.to_string())
            .ok_or(GitHubError::MissingPrUrl)?;
        Ok(CreatedPr {
            number: pr.number,
            url,
        })
    }

    async fn replace_labels(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<String>> {
        let applied = self
            .client
            .issues(owner, repo)
            .replace_all_labels(number, labels)
            .await
            .map_err(GitHubError::from)?;
        Ok(applied.into_iter().map(|l| l.name).collect())
    }
}
