//! Commit the working tree and push the run's branch to origin.

use git2::{IndexAddOption, Oid, PushOptions, Signature};

use super::error::{GitError, Result};
use super::stage::StagedRepo;

/// Name and email used for both author and committer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

/// Stage every change, commit on HEAD and push the branch to `origin`.
pub fn commit_and_push(staged: &StagedRepo, author: &CommitAuthor, message: &str) -> Result<Oid> {
    let oid = commit_all(staged, author, message)?;
    tracing::info!(commit = %oid, message, "created commit");

    push(staged)?;
    tracing::info!(branch = staged.branch(), "pushed branch to origin");

    Ok(oid)
}

fn commit_all(staged: &StagedRepo, author: &CommitAuthor, message: &str) -> Result<Oid> {
    let repo = staged.repo();

    let tree_id = {
        let mut index = repo.index().map_err(GitError::Stage)?;
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .map_err(GitError::Stage)?;
        // add_all does not record deletions
        index
            .update_all(["*"].iter(), None)
            .map_err(GitError::Stage)?;
        index.write().map_err(GitError::Stage)?;
        index.write_tree().map_err(GitError::Stage)?
    };

    let tree = repo.find_tree(tree_id).map_err(GitError::Commit)?;
    let parent = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .map_err(GitError::Commit)?;
    let signature = Signature::now(&author.name, &author.email).map_err(GitError::Commit)?;

    let oid = repo
        .commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )
        .map_err(GitError::Commit)?;
    Ok(oid)
}

fn push(staged: &StagedRepo) -> Result<()> {
    let branch_ref = staged.branch_ref();
    let refspec = format!("{branch_ref}:{branch_ref}");
    let to_push_error = |source| GitError::Push {
        refspec: refspec.clone(),
        source,
    };

    let mut remote = staged
        .repo()
        .find_remote("origin")
        .map_err(to_push_error)?;

    // push() succeeds even when the remote refuses a ref; the refusal only
    // shows up in the update-reference callback.
    let mut rejection: Option<(String, String)> = None;
    {
        let mut callbacks = staged.auth().callbacks();
        callbacks.push_update_reference(|reference, status| {
            if let Some(reason) = status {
                rejection = Some((reference.to_string(), reason.to_string()));
            }
            Ok(())
        });

        let mut push_opts = PushOptions::new();
        push_opts.remote_callbacks(callbacks);
        remote
            .push(&[refspec.as_str()], Some(&mut push_opts))
            .map_err(to_push_error)?;
    }

    if let Some((reference, reason)) = rejection {
        return Err(GitError::PushRejected { reference, reason }.into());
    }
    Ok(())
}
