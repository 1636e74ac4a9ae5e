//! Scratch git repositories for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Rewrites the tracked page with new content
pub const REWRITE_INDEX: &str = "printf '<html>v2</html>\\n' > docs/index.html";

/// A repository whose `docs/` directory is gitignored but has one committed page
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let repo = Self { dir };

        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.name", "Docs Bot"]);
        repo.git(&["config", "user.email", "docs@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);

        repo.write(".gitignore", "docs/\n");
        repo.write("docs/index.html", "<html>v1</html>\n");
        repo.git(&["add", ".gitignore"]);
        repo.git(&["add", "--force", "docs"]);
        repo.git(&["commit", "-q", "-m", "Initial commit"]);

        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, content).expect("write file");
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn commit_count(&self) -> usize {
        self.git(&["rev-list", "--count", "HEAD"])
            .parse()
            .expect("numeric commit count")
    }

    pub fn last_message(&self) -> String {
        self.git(&["log", "-1", "--format=%s"])
    }

    pub fn last_commit_files(&self) -> Vec<String> {
        self.git(&["show", "--name-only", "--format=", "HEAD"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn staged_files(&self) -> String {
        self.git(&["diff", "--cached", "--name-only"])
    }
}
