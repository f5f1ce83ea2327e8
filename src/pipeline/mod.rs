//! One update run, start to finish.
//!
//! Stage the config repository on a fresh branch, rewrite the config
//! documents, commit and push, open the pull request (and label it), then
//! optionally comment on the commit that triggered the update.
//!
//! Every step is fatal on failure. The only early success is a target that
//! already holds the new value, which ends the run before anything is pushed.

mod error;
mod request;

use std::path::{Path, PathBuf};

use anyhow::Context;

pub use error::{ConfigError, PipelineError, Result};
pub use request::{UpdateMode, UpdateRequest};

use crate::config_doc::{self, MutationOutcome};
use crate::infra::git::{self, GitAuth};
use crate::infra::github::{
    CommentClient, CommitComment, CreatePrParams, CreatedPr, PrClient, comment_on_ref,
};

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// A target already held the value. Nothing was committed.
    AlreadySet { document: PathBuf, key: String },
    Published {
        pr: CreatedPr,
        comment: Option<CommitComment>,
    },
}

/// Run the whole pipeline for `request`.
///
/// `server_url` is the forge's web root (clone URLs and PR-body links);
/// `token` authenticates the git transport.
pub async fn run<C>(
    request: &UpdateRequest,
    server_url: &str,
    token: &str,
    client: &C,
) -> Result<PipelineOutcome>
where
    C: PrClient + CommentClient + ?Sized,
{
    let branch = request.branch();
    let url = git::clone_url(server_url, &request.org, &request.clone_repo);
    let auth = GitAuth::new(request.author.name.as_str(), token);

    tracing::info!(%url, base = %branch.base, branch = %branch.name, "staging repository");
    let staged = git::stage(&url, auth, &branch.base, &branch.name).with_context(|| {
        PipelineError::Stage {
            branch: branch.full_ref(),
        }
    })?;

    if request.edit_config {
        let new_value = request.new_value();
        let outcome = config_doc::mutate(
            staged.path(),
            &request.config_folder,
            request.format,
            &request.targets,
            &new_value,
        )
        .context(PipelineError::Mutate)?;

        match outcome {
            MutationOutcome::AlreadySet { path, key } => {
                let document = relative_to(&path, staged.path());
                tracing::info!(
                    document = %document.display(),
                    %key,
                    value = %new_value,
                    "config already up to date, nothing to publish"
                );
                return Ok(PipelineOutcome::AlreadySet {
                    document,
                    key: key.to_string(),
                });
            }
            MutationOutcome::Applied(changes) => {
                for change in &changes {
                    tracing::debug!(
                        document = %relative_to(&change.path, staged.path()).display(),
                        key = %change.key,
                        previous = %change.previous,
                        "rewrote target"
                    );
                }
            }
        }
    } else {
        tracing::info!("config editing disabled, committing the tree as cloned");
    }

    git::commit_and_push(&staged, &request.author, &request.title()).with_context(|| {
        PipelineError::Commit {
            branch: branch.name.clone(),
        }
    })?;
    drop(staged);

    let params = CreatePrParams {
        owner: request.org.clone(),
        repo: request.clone_repo.clone(),
        title: request.title(),
        body: request.pr_body(server_url),
        head: branch.name.clone(),
        base: branch.base.clone(),
        auto_merge_label: request.auto_merge_label.clone(),
    };
    let pr = publish(client, &params).await?;

    let comment = match request.git_ref.as_deref() {
        Some(reference) => Some(
            comment_on_ref(
                client,
                &request.org,
                &request.repo_name,
                reference,
                &request.comment_body(&pr.url),
            )
            .await
            .with_context(|| PipelineError::Comment {
                reference: reference.to_string(),
            })?,
        ),
        None => None,
    };

    Ok(PipelineOutcome::Published { pr, comment })
}

/// Open the pull request, then replace its labels with the auto-merge label if one is set.
///
/// The PR stays open when labelling fails.
async fn publish<C: PrClient + ?Sized>(client: &C, params: &CreatePrParams) -> Result<CreatedPr> {
    let pr = client
        .create_pull_request(params)
        .await
        .with_context(|| PipelineError::PullRequest {
            head: params.head.clone(),
            base: params.base.clone(),
        })?;
    tracing::info!(number = pr.number, url = %pr.url, "pull request created");

    if let Some(label) = params.auto_merge_label.as_deref().filter(|l| !l.is_empty()) {
        let labels = client
            .replace_labels(&params.owner, &params.repo, pr.number, &[label.to_string()])
            .await
            .context(PipelineError::Label { number: pr.number })?;
        tracing::info!(number = pr.number, ?labels, "labels replaced");
    }

    Ok(pr)
}

fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
