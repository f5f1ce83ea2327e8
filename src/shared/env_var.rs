//! Centralized reader for the environment variables this tool consumes.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const GIT_TOKEN: &str = "GIT_TOKEN";
const GITHUB_SERVER_URL: &str = "GITHUB_SERVER_URL";
const GITHUB_API_URL: &str = "GITHUB_API_URL";

const DEFAULT_SERVER_URL: &str = "https://github.com";
const DEFAULT_API_URL: &str = "https://api.github.com";

/// Snapshot of the relevant environment variables at load time.
#[derive(Debug, Clone)]
pub struct EnvVars {
    /// Token used for git basic-auth and the GitHub REST API.
    pub git_token: Option<String>,

    /// Web host used for clone URLs and links in the PR body.
    pub server_url: String,

    /// Base URL of the GitHub REST API.
    pub api_url: String,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all variables from the current process.
    pub fn load() -> Self {
        Self {
            git_token: non_empty_var(GIT_TOKEN),
            server_url: non_empty_var(GITHUB_SERVER_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            api_url: non_empty_var(GITHUB_API_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    /// Returns the env var name holding the token (used in error messages).
    pub fn git_token_name() -> &'static str {
        GIT_TOKEN
    }
}
