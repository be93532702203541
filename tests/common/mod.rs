//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{IndexAddOption, Oid, Repository, Signature};

use autocommit::tools::ToolContext;

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory, with a local
    /// identity so the git CLI can commit in it.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config.set_bool("commit.gpgsign", false).expect("Failed to set commit.gpgsign");
        }
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Tool context running the real git binary in this repository.
    pub fn context(&self) -> ToolContext {
        ToolContext::system(self.path())
    }

    /// Write a file relative to the repository root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
    }

    /// Delete a file from the working tree.
    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.path().join(relative)).expect("Failed to remove test file");
    }

    /// Stage a path (added or modified) in the index.
    pub fn stage(&self, relative: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(relative)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Stage the removal of a path.
    pub fn stage_removal(&self, relative: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.remove_path(Path::new(relative)).expect("Failed to remove file from index");
        index.write().expect("Failed to write index");
    }

    /// Stage everything in the working tree and commit it. Returns the commit OID.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Summary line of the commit HEAD points to.
    pub fn head_summary(&self) -> String {
        let head = self.repo.head().expect("No HEAD").peel_to_commit().expect("HEAD is not a commit");
        head.summary().unwrap_or_default().to_string()
    }

    pub fn head_id(&self) -> Oid {
        self.repo.head().expect("No HEAD").peel_to_commit().expect("HEAD is not a commit").id()
    }
}
