//! The immutable description of one update run.

use crate::config_doc::{ConfigFormat, ConfigTarget};
use crate::infra::git::CommitAuthor;

/// What gets written into the config documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// `<imagePrefix>/<repo>:<imageID>`
    Image,
    /// The bare image ID.
    Version,
}

/// A validated update request, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub image_id: String,
    pub image_prefix: String,
    pub org: String,
    /// Repository the image belongs to; names the branch, commit and PR links.
    pub repo_name: String,
    /// Repository holding the config documents; cloned and PR'd against.
    pub clone_repo: String,
    pub config_folder: String,
    pub targets: Vec<ConfigTarget>,
    pub format: ConfigFormat,
    pub mode: UpdateMode,
    /// When false the documents are left untouched.
    pub edit_config: bool,
    pub commit_message: String,
    pub author: CommitAuthor,
    pub auto_merge_label: Option<String>,
    pub head_branch: String,
    pub git_ref: Option<String>,
}

/// Branch names derived from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSpec {
    /// Branch cloned from and PR'd into.
    pub base: String,
    /// `<repo>-<imageID>`
    pub name: String,
}

impl BranchSpec {
    pub fn full_ref(&self) -> String {
        format!("refs/heads/{}", self.name)
    }
}

impl UpdateRequest {
    pub fn branch(&self) -> BranchSpec {
        BranchSpec {
            base: self.head_branch.clone(),
            name: format!("{}-{}", self.repo_name, self.image_id),
        }
    }

    /// The value written to every target.
    pub fn new_value(&self) -> String {
        match self.mode {
            UpdateMode::Image => match self.image_prefix.trim_end_matches('/') {
                "" => format!("{}:{}", self.repo_name, self.image_id),
                prefix => format!("{prefix}/{}:{}", self.repo_name, self.image_id),
            },
            UpdateMode::Version => self.image_id.clone(),
        }
    }

    /// Commit message and PR title.
    pub fn title(&self) -> String {
        format!("feat({}): {}", self.repo_name, self.commit_message)
    }

    pub fn pr_body(&self, server_url: &str) -> String {
        let base = format!(
            "{}/{}/{}",
            server_url.trim_end_matches('/'),
            self.org,
            self.repo_name
        );
        format!(
            "Link to changes if tag:  {base}/releases/tag/{id}\nLink to changes if commit: {base}/commit/{id}",
            id = self.image_id
        )
    }

    /// Names the value that was written, or the bare image ID when no document was edited.
    pub fn comment_body(&self, pr_url: &str) -> String {
        let rolled_out = if self.edit_config {
            self.new_value()
        } else {
            self.image_id.clone()
        };
        format!("Pull request for {rolled_out} opened: {pr_url}")
    }
}
