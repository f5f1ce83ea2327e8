//! GitHub API client built on octocrab.

use anyhow::Context;

use super::error::{GitHubError, Result};

/// Production client authenticated with a static token.
pub struct OctocrabClient {
    pub(crate) client: octocrab::Octocrab,
}

impl OctocrabClient {
    /// Build a client for the REST API at `base_url` (e.g. `https://api.github.com`).
    ///
    /// Must be called from within a tokio runtime.
    pub fn with_base_url(base_url: &str, token: &str) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(GitHubError::TokenError("token is empty".to_string()).into());
        }
        let client = octocrab::Octocrab::builder()
            .base_uri(base_url)
            .with_context(|| format!("Invalid GitHub API URL: {base_url}"))?
            .personal_token(token.to_string())
            .build()
            .context("Failed to build octocrab client")?;
        Ok(Self { client })
    }
}
