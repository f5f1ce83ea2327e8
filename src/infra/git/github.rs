//! GitHub-style clone URLs.

/// HTTPS clone URL for `<org>/<repo>` on the given server.
pub fn clone_url(server_url: &str, org: &str, repo: &str) -> String {
    format!("{}/{org}/{repo}.git", server_url.trim_end_matches('/'))
}
