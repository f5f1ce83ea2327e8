//! Test utilities: a local bare repository acting as `origin`.

use git2::{BranchType, IndexAddOption, Oid, Repository, ResetType, Signature};
use std::path::Path;
use tempfile::TempDir;

/// A bare repository laid out like a forge (`<root>/<org>/<repo>.git`),
/// seeded from a scratch working repository.
pub struct RemoteFixture {
    root: TempDir,
    work: TempDir,
    org: String,
    repo: String,
    base_branch: String,
}

impl RemoteFixture {
    /// Create the remote with one commit on `branch` containing `files`.
    pub fn new(org: &str, repo: &str, branch: &str, files: &[(&str, &str)]) -> Self {
        let root = TempDir::new().expect("create remote root");
        let bare_path = root.path().join(org).join(format!("{repo}.git"));
        Repository::init_bare(&bare_path).expect("init bare remote");

        let work = TempDir::new().expect("create work dir");
        let work_repo = Repository::init(work.path()).expect("init work repo");
        write_files(work.path(), files);
        {
            let sig = signature();
            let tree_id = index_tree(&work_repo);
            let tree = work_repo.find_tree(tree_id).unwrap();
            work_repo
                .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .expect("create initial commit");
        }

        // Rename default branch if needed
        {
            let head = work_repo.head().expect("get head");
            let current_branch = head.shorthand().unwrap_or("master").to_string();
            drop(head);
            if current_branch != branch {
                let mut branch_ref = work_repo
                    .find_branch(&current_branch, BranchType::Local)
                    .expect("find branch");
                branch_ref.rename(branch, true).expect("rename branch");
            }
        }

        let fixture = Self {
            root,
            work,
            org: org.to_string(),
            repo: repo.to_string(),
            base_branch: branch.to_string(),
        };
        work_repo
            .remote("origin", &fixture.url())
            .expect("set origin");
        fixture.push_from_work(branch);
        fixture
    }

    /// `file://` URL of the directory holding `<org>/<repo>.git`.
    pub fn server_url(&self) -> String {
        format!("file://{}", self.root.path().display())
    }

    pub fn url(&self) -> String {
        format!("{}/{}/{}.git", self.server_url(), self.org, self.repo)
    }

    /// Open the bare remote.
    pub fn open(&self) -> Repository {
        Repository::open_bare(
            self.root
                .path()
                .join(&self.org)
                .join(format!("{}.git", self.repo)),
        )
        .expect("open bare remote")
    }

    /// Push a commit with `files` on top of the base branch to `branch`.
    pub fn commit_on(&self, branch: &str, files: &[(&str, &str)]) -> Oid {
        let repo = Repository::open(self.work.path()).expect("open work repo");
        let base = repo
            .find_reference(&format!("refs/heads/{}", self.base_branch))
            .and_then(|r| r.peel_to_commit())
            .expect("base commit");

        write_files(self.work.path(), files);
        let tree_id = index_tree(&repo);
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = signature();
        let branch_ref = format!("refs/heads/{branch}");
        let oid = repo
            .commit(
                Some(branch_ref.as_str()),
                &sig,
                &sig,
                &format!("Update {branch}"),
                &tree,
                &[&base],
            )
            .expect("commit on branch");

        repo.reset(base.as_object(), ResetType::Hard, None)
            .expect("reset work repo");
        self.push_from_work(branch);
        oid
    }

    /// Commit id at the tip of `branch` on the remote.
    pub fn branch_commit(&self, branch: &str) -> Option<Oid> {
        let repo = self.open();
        let reference = repo.find_reference(&format!("refs/heads/{branch}")).ok()?;
        reference.target()
    }

    /// Names of all branches on the remote.
    pub fn branch_names(&self) -> Vec<String> {
        let repo = self.open();
        let mut names: Vec<String> = repo
            .branches(Some(BranchType::Local))
            .unwrap()
            .filter_map(|b| b.ok()?.0.name().ok()?.map(str::to_string))
            .collect();
        names.sort();
        names
    }

    /// Contents of `path` at the tip of `branch` on the remote.
    pub fn read_file(&self, branch: &str, path: &str) -> Option<String> {
        let repo = self.open();
        let commit = repo
            .find_reference(&format!("refs/heads/{branch}"))
            .ok()?
            .peel_to_commit()
            .ok()?;
        let entry = commit.tree().ok()?.get_path(Path::new(path)).ok()?;
        let blob = repo.find_blob(entry.id()).ok()?;
        Some(String::from_utf8_lossy(blob.content()).into_owned())
    }

    fn push_from_work(&self, branch: &str) {
        let repo = Repository::open(self.work.path()).expect("open work repo");
        let mut remote = repo.find_remote("origin").expect("find origin");
        remote
            .push(&[format!("+refs/heads/{branch}:refs/heads/{branch}")], None)
            .expect("push to fixture remote");
    }
}

fn signature() -> Signature<'static> {
    Signature::now("Test", "test@example.com").unwrap()
}

fn write_files(root: &Path, files: &[(&str, &str)]) {
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
}

fn index_tree(repo: &Repository) -> Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    index.write_tree().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_serves_seeded_branch() {
        let remote = RemoteFixture::new("acme", "deploy", "main", &[("deploy/values.yaml", "x: 1\n")]);

        assert_eq!(remote.branch_names(), vec!["main".to_string()]);
        assert_eq!(
            remote.read_file("main", "deploy/values.yaml").as_deref(),
            Some("x: 1\n")
        );
        assert!(remote.url().ends_with("/acme/deploy.git"));
    }

    #[test]
    fn commit_on_creates_branch_from_base() {
        let remote = RemoteFixture::new("acme", "deploy", "main", &[("a.txt", "a")]);
        let base = remote.branch_commit("main").unwrap();

        let oid = remote.commit_on("feature", &[("a.txt", "b")]);

        assert_eq!(remote.branch_commit("feature"), Some(oid));
        assert_eq!(remote.branch_commit("main"), Some(base));
        assert_eq!(remote.read_file("feature", "a.txt").as_deref(), Some("b"));
    }
}
