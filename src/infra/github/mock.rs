//! wiremock-based GitHub mock server for testing.
//!
//! Use the builder pattern via `mock.repo(owner, repo)`:
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//! let ctx = mock.repo("owner", "repo");
//!
//! ctx.pull_request(1).create().await;
//! ctx.pull_request(1).replace_labels().await;
//! ctx.tags().page(&[("v1.0.0", "abc123")]).mount().await;
//! ctx.commit_comment("abc123").create().await;
//!
//! let sent = mock.requests_to("/repos/owner/repo/pulls").await;
//! ```

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::client::OctocrabClient;
use super::comment::TAG_PAGE_SIZE;

/// Create a mock user JSON object for octocrab Author model.
fn mock_user(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "id": 1,
        "node_id": "U_test",
        "avatar_url": "https://avatars.githubusercontent.com/u/1",
        "gravatar_id": "",
        "url": format!("https://api.github.com/users/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "followers_url": format!("https://api.github.com/users/{login}/followers"),
        "following_url": format!("https://api.github.com/users/{login}/following{{/other_user}}"),
        "gists_url": format!("https://api.github.com/users/{login}/gists{{/gist_id}}"),
        "starred_url": format!("https://api.github.com/users/{login}/starred{{/owner}}{{/repo}}"),
        "subscriptions_url": format!("https://api.github.com/users/{login}/subscriptions"),
        "organizations_url": format!("https://api.github.com/users/{login}/orgs"),
        "repos_url": format!("https://api.github.com/users/{login}/repos"),
        "events_url": format!("https://api.github.com/users/{login}/events{{/privacy}}"),
        "received_events_url": format!("https://api.github.com/users/{login}/received_events"),
        "type": "User",
        "site_admin": false
    })
}

/// Create a mock label JSON object for octocrab Label model.
fn mock_label(owner: &str, repo: &str, name: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "node_id": "LA_test",
        "url": format!("https://api.github.com/repos/{owner}/{repo}/labels/{name}"),
        "name": name,
        "color": "0e8a16",
        "default": false
    })
}

/// Create a mock pull request JSON object for octocrab PullRequest model.
fn mock_pull_request(owner: &str, repo: &str, pr_number: u64, head: &str) -> serde_json::Value {
    let api = format!("https://api.github.com/repos/{owner}/{repo}");
    let web = format!("https://github.com/{owner}/{repo}");
    json!({
        "id": 1,
        "node_id": "PR_test",
        "number": pr_number,
        "state": "open",
        "locked": false,
        "title": "Test PR",
        "body": "Test body",
        "user": mock_user("release-bot"),
        "url": format!("{api}/pulls/{pr_number}"),
        "html_url": format!("{web}/pull/{pr_number}"),
        "diff_url": format!("{web}/pull/{pr_number}.diff"),
        "patch_url": format!("{web}/pull/{pr_number}.patch"),
        "issue_url": format!("{api}/issues/{pr_number}"),
        "commits_url": format!("{api}/pulls/{pr_number}/commits"),
        "review_comments_url": format!("{api}/pulls/{pr_number}/comments"),
        "review_comment_url": format!("{api}/pulls/comments{{/number}}"),
        "comments_url": format!("{api}/issues/{pr_number}/comments"),
        "statuses_url": format!("{api}/statuses/abc123"),
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "labels": [],
        "head": {
            "label": format!("{owner}:{head}"),
            "ref": head,
            "sha": "abc123"
        },
        "base": {
            "label": format!("{owner}:main"),
            "ref": "main",
            "sha": "def456"
        }
    })
}

/// Create a mock tag JSON object for octocrab Tag model.
fn mock_tag(owner: &str, repo: &str, name: &str, sha: &str) -> serde_json::Value {
    json!({
        "name": name,
        "commit": {
            "sha": sha,
            "url": format!("https://api.github.com/repos/{owner}/{repo}/commits/{sha}")
        },
        "zipball_url": format!("https://api.github.com/repos/{owner}/{repo}/zipball/{name}"),
        "tarball_url": format!("https://api.github.com/repos/{owner}/{repo}/tarball/{name}"),
        "node_id": "REF_test"
    })
}

fn mock_error(message: &str) -> serde_json::Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}

/// wiremock-based GitHub mock server for testing.
///
/// This provides HTTP-level mocking for GitHub API endpoints, allowing tests
/// to verify actual HTTP requests rather than mocking at the trait level.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Get an OctocrabClient configured to use this mock server.
    pub fn client(&self) -> OctocrabClient {
        OctocrabClient::with_base_url(&self.server.uri(), "test-token").unwrap()
    }

    /// Create a repository context for building mocks.
    pub fn repo<'a>(&'a self, owner: &'a str, repo: &'a str) -> MockRepoContext<'a> {
        MockRepoContext {
            server: &self.server,
            owner,
            repo,
        }
    }

    /// Every request the server has received, in order.
    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Requests received for an exact path.
    pub async fn requests_to(&self, request_path: &str) -> Vec<Request> {
        self.requests()
            .await
            .into_iter()
            .filter(|r| r.url.path() == request_path)
            .collect()
    }
}

// ============ Builder Pattern API ============

/// Repository context for building mocks.
pub struct MockRepoContext<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
}

impl<'a> MockRepoContext<'a> {
    /// Create a pull request mock builder.
    pub fn pull_request(&self, number: u64) -> MockPullRequestBuilder<'_> {
        MockPullRequestBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            number,
        }
    }

    /// Create a paginated tag listing mock builder.
    pub fn tags(&self) -> MockTagsBuilder<'_> {
        MockTagsBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            pages: Vec::new(),
        }
    }

    /// Create a commit comment mock builder.
    pub fn commit_comment(&self, sha: &'a str) -> MockCommitCommentBuilder<'_> {
        MockCommitCommentBuilder {
            server: self.server,
            owner: self.owner,
            repo: self.repo,
            sha,
        }
    }
}

/// Builder for mocking pull request endpoints.
pub struct MockPullRequestBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    number: u64,
}

impl<'a> MockPullRequestBuilder<'a> {
    /// Mount mock for POST /repos/{owner}/{repo}/pulls.
    pub async fn create(self) {
        let owner = self.owner.to_string();
        let repo = self.repo.to_string();
        let number = self.number;
        Mock::given(method("POST"))
            .and(path(format!("/repos/{owner}/{repo}/pulls")))
            .respond_with(move |req: &Request| {
                let head = req
                    .body_json::<serde_json::Value>()
                    .ok()
                    .and_then(|b| b["head"].as_str().map(str::to_string))
                    .unwrap_or_else(|| "feature".to_string());
                ResponseTemplate::new(201)
                    .set_body_json(mock_pull_request(&owner, &repo, number, &head))
            })
            .mount(self.server)
            .await;
    }

    /// Mount mock for POST /repos/{owner}/{repo}/pulls returning 422.
    pub async fn create_fails(self) {
        let owner = self.owner;
        let repo = self.repo;
        Mock::given(method("POST"))
            .and(path(format!("/repos/{owner}/{repo}/pulls")))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "message": "Validation Failed",
                "errors": [{
                    "resource": "PullRequest",
                    "code": "custom",
                    "message": "A pull request already exists for acme:svc-a-v1."
                }],
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(self.server)
            .await;
    }

    /// Mount mock for PUT /repos/{owner}/{repo}/issues/{number}/labels.
    ///
    /// Responds with exactly the labels sent in the request.
    pub async fn replace_labels(self) {
        let owner = self.owner.to_string();
        let repo = self.repo.to_string();
        let number = self.number;
        Mock::given(method("PUT"))
            .and(path(format!("/repos/{owner}/{repo}/issues/{number}/labels")))
            .respond_with(move |req: &Request| {
                let names: Vec<String> = req
                    .body_json::<serde_json::Value>()
                    .ok()
                    .and_then(|b| serde_json::from_value(b["labels"].clone()).ok())
                    .unwrap_or_default();
                let labels: Vec<_> = names
                    .iter()
                    .map(|name| mock_label(&owner, &repo, name))
                    .collect();
                ResponseTemplate::new(200).set_body_json(labels)
            })
            .mount(self.server)
            .await;
    }

    /// Mount mock for PUT /repos/{owner}/{repo}/issues/{number}/labels returning 403.
    pub async fn replace_labels_fails(self) {
        let owner = self.owner;
        let repo = self.repo;
        let number = self.number;
        Mock::given(method("PUT"))
            .and(path(format!("/repos/{owner}/{repo}/issues/{number}/labels")))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(mock_error("Resource not accessible")),
            )
            .mount(self.server)
            .await;
    }
}

/// Builder for mocking GET /repos/{owner}/{repo}/tags across pages.
pub struct MockTagsBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    pages: Vec<Vec<(&'a str, &'a str)>>,
}

impl<'a> MockTagsBuilder<'a> {
    /// Add a page of `(name, sha)` tags.
    pub fn page(mut self, tags: &[(&'a str, &'a str)]) -> Self {
        self.pages.push(tags.to_vec());
        self
    }

    /// Mount one mock per page, linked with `rel="next"` headers.
    pub async fn mount(mut self) {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let owner = self.owner;
        let repo = self.repo;
        let route = format!("/repos/{owner}/{repo}/tags");
        let total = self.pages.len();

        for (index, tags) in self.pages.iter().enumerate() {
            let number = index + 1;
            let body: Vec<_> = tags
                .iter()
                .map(|(name, sha)| mock_tag(owner, repo, name, sha))
                .collect();

            let mut response = ResponseTemplate::new(200).set_body_json(body);
            if number < total {
                let next = format!(
                    "{}{route}?per_page={TAG_PAGE_SIZE}&page={}",
                    self.server.uri(),
                    number + 1
                );
                response = response.insert_header("Link", format!("<{next}>; rel=\"next\""));
            }

            let mock = Mock::given(method("GET")).and(path(route.clone()));
            let mock = if number == 1 {
                mock.and(query_param_is_missing("page"))
            } else {
                mock.and(query_param("page", number.to_string()))
            };
            mock.respond_with(response).mount(self.server).await;
        }
    }
}

/// Builder for mocking POST /repos/{owner}/{repo}/commits/{sha}/comments.
pub struct MockCommitCommentBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    repo: &'a str,
    sha: &'a str,
}

impl<'a> MockCommitCommentBuilder<'a> {
    pub async fn create(self) {
        let owner = self.owner;
        let repo = self.repo;
        let sha = self.sha;
        Mock::given(method("POST"))
            .and(path(format!("/repos/{owner}/{repo}/commits/{sha}/comments")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 1,
                "node_id": "CC_test",
                "html_url": format!("https://github.com/{owner}/{repo}/commit/{sha}#commitcomment-1"),
                "url": format!("https://api.github.com/repos/{owner}/{repo}/comments/1"),
                "body": "comment",
                "commit_id": sha,
                "user": mock_user("release-bot"),
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            })))
            .mount(self.server)
            .await;
    }
}
