use clap::{ArgAction, Parser};

use crate::config_doc::{ConfigFormat, ConfigTarget, KeyPath};
use crate::infra::git::CommitAuthor;
use crate::logging::LogFormat;
use crate::pipeline::{ConfigError, UpdateMode, UpdateRequest};

#[derive(Parser, Debug)]
#[command(
    name = "image-update",
    version,
    about = "Bump an image tag in a GitOps config repository and open a pull request"
)]
pub struct Cli {
    /// Image ID (tag or commit SHA) to roll out
    #[arg(long = "imageid")]
    pub image_id: Option<String>,

    /// Registry prefix, e.g. ghcr.io/acme
    #[arg(long = "imageprefix")]
    pub image_prefix: Option<String>,

    /// GitHub organization owning both repositories
    #[arg(long = "githuborg")]
    pub github_org: Option<String>,

    /// Repository holding the config documents
    #[arg(long = "repoclone")]
    pub repo_clone: Option<String>,

    /// Repository the image is built from
    #[arg(long = "reponame")]
    pub repo_name: Option<String>,

    /// Folder of the config documents, relative to the repository root
    #[arg(long = "configfolder", default_value = "")]
    pub config_folder: String,

    /// Config document names (repeatable or comma separated)
    #[arg(long = "configname", value_delimiter = ',')]
    pub config_names: Vec<String>,

    /// Dot-separated keys to update, one per document
    #[arg(long = "vipersearch", visible_alias = "searchkey", value_delimiter = ',')]
    pub search_keys: Vec<String>,

    #[arg(long = "configtype", value_enum, default_value = "yaml")]
    pub config_type: ConfigFormat,

    /// Write `<imageprefix>/<reponame>:<imageid>`
    #[arg(
        long = "updateimage",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "true",
        default_missing_value = "true"
    )]
    pub update_image: bool,

    /// Write the bare image ID (takes precedence over --updateimage)
    #[arg(long = "updateversion")]
    pub update_version: bool,

    /// Edit the config documents; without it the branch carries an empty commit
    #[arg(long)]
    pub custom: bool,

    /// Appended to `feat(<reponame>): `
    #[arg(long = "commitmessage")]
    pub commit_message: Option<String>,

    #[arg(long = "githubusername")]
    pub github_username: Option<String>,

    #[arg(long = "githubemail")]
    pub github_email: Option<String>,

    /// Label that replaces the PR's labels
    #[arg(long = "automergelabel")]
    pub auto_merge_label: Option<String>,

    /// Branch to clone from and open the PR against
    #[arg(long = "headbranchname")]
    pub head_branch_name: Option<String>,

    /// Commit SHA or tag of <reponame> to comment on once the PR is open
    #[arg(long = "gitref")]
    pub git_ref: Option<String>,

    #[arg(long = "log-format", value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Validate the flags into an immutable request.
    pub fn into_request(self) -> Result<UpdateRequest, ConfigError> {
        let mode = if self.update_version {
            UpdateMode::Version
        } else if self.update_image {
            UpdateMode::Image
        } else {
            return Err(ConfigError::NoUpdateMode);
        };

        let image_id = required(self.image_id, "imageid")?;
        let org = required(self.github_org, "githuborg")?;
        let clone_repo = required(self.repo_clone, "repoclone")?;
        let repo_name = required(self.repo_name, "reponame")?;
        let commit_message = required(self.commit_message, "commitmessage")?;
        let username = required(self.github_username, "githubusername")?;
        let email = required(self.github_email, "githubemail")?;
        let head_branch = required(self.head_branch_name, "headbranchname")?;
        let image_prefix = match mode {
            UpdateMode::Image if self.custom => required(self.image_prefix, "imageprefix")?,
            _ => self.image_prefix.unwrap_or_default(),
        };

        let targets = if self.custom {
            targets(&self.config_names, &self.search_keys)?
        } else {
            Vec::new()
        };

        Ok(UpdateRequest {
            image_id,
            image_prefix,
            org,
            repo_name,
            clone_repo,
            config_folder: self.config_folder,
            targets,
            format: self.config_type,
            mode,
            edit_config: self.custom,
            commit_message,
            author: CommitAuthor {
                name: username,
                email,
            },
            auto_merge_label: non_empty(self.auto_merge_label),
            head_branch,
            git_ref: non_empty(self.git_ref),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, flag: &'static str) -> Result<String, ConfigError> {
    non_empty(value).ok_or(ConfigError::Missing(flag))
}

fn targets(names: &[String], keys: &[String]) -> Result<Vec<ConfigTarget>, ConfigError> {
    let names: Vec<&str> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect();
    let keys: Vec<&str> = keys
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();

    if names.is_empty() || keys.is_empty() {
        return Err(ConfigError::NoTargets);
    }
    if names.len() != keys.len() {
        return Err(ConfigError::TargetCountMismatch {
            documents: names.len(),
            keys: keys.len(),
        });
    }

    names
        .into_iter()
        .zip(keys)
        .map(|(document, key)| {
            Ok(ConfigTarget {
                document: document.to_string(),
                key: KeyPath::parse(key)?,
            })
        })
        .collect()
}
