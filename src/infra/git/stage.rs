//! Clone a repository into a temporary working tree and switch to a new branch.

use std::path::Path;

use anyhow::Context;
use git2::build::{CheckoutBuilder, RepoBuilder};
use git2::{FetchOptions, Repository};
use tempfile::TempDir;

use super::auth::GitAuth;
use super::error::{GitError, Result};

/// A fresh clone checked out on a new branch.
///
/// The clone lives in a temporary directory that is removed when this value
/// is dropped, whichever way the run ends.
pub struct StagedRepo {
    // Declared before `dir` so the handle is closed before the directory goes away.
    repo: Repository,
    branch: String,
    auth: GitAuth,
    dir: TempDir,
}

impl StagedRepo {
    /// Root of the working tree.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Short name of the branch created for this run.
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Full ref name of the branch created for this run.
    pub fn branch_ref(&self) -> String {
        format!("refs/heads/{}", self.branch)
    }

    pub fn auth(&self) -> &GitAuth {
        &self.auth
    }
}

/// Clone `url` at branch `source_ref`, then create and check out `branch`
/// pointing at the same commit.
pub fn stage(url: &str, auth: GitAuth, source_ref: &str, branch: &str) -> Result<StagedRepo> {
    let dir = tempfile::Builder::new()
        .prefix(&format!("{}-", sanitize_for_path(branch)))
        .tempdir()
        .context("Failed to create temporary directory for clone")?;

    tracing::info!(
        url,
        reference = source_ref,
        path = %dir.path().display(),
        "cloning repository"
    );
    let repo = clone(url, &auth, source_ref, dir.path())?;

    create_branch(&repo, branch)?;
    checkout(&repo, branch)?;
    tracing::info!(branch, "checked out new branch");

    Ok(StagedRepo {
        repo,
        branch: branch.to_string(),
        auth,
        dir,
    })
}

fn clone(url: &str, auth: &GitAuth, source_ref: &str, into: &Path) -> Result<Repository> {
    let mut fetch_opts = FetchOptions::new();
    fetch_opts.remote_callbacks(auth.callbacks());

    let mut builder = RepoBuilder::new();
    builder.branch(source_ref);
    builder.fetch_options(fetch_opts);

    builder.clone(url, into).map_err(|source| {
        GitError::Clone {
            url: url.to_string(),
            reference: source_ref.to_string(),
            source,
        }
        .into()
    })
}

/// Point a new local branch at the commit HEAD currently resolves to.
fn create_branch(repo: &Repository, branch: &str) -> Result<()> {
    let to_branch_error = |source| GitError::CreateBranch {
        branch: branch.to_string(),
        source,
    };
    let head = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map_err(to_branch_error)?;
    repo.branch(branch, &head, false).map_err(to_branch_error)?;
    Ok(())
}

fn checkout(repo: &Repository, branch: &str) -> Result<()> {
    let to_checkout_error = |source| GitError::Checkout {
        branch: branch.to_string(),
        source,
    };
    repo.set_head(&format!("refs/heads/{branch}"))
        .map_err(to_checkout_error)?;
    repo.checkout_head(Some(CheckoutBuilder::new().force()))
        .map_err(to_checkout_error)?;
    Ok(())
}

/// Make a branch name usable as a directory name prefix.
fn sanitize_for_path(branch: &str) -> String {
    branch
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
