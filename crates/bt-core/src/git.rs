//! Branch tracking via `.git/HEAD`.
//!
//! The tracker consults a single repository (multi-repo workspaces are
//! unsupported) and normalizes the absence of a repository or a detached
//! HEAD to "no active branch".

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::BranchName;

/// Branch tracker errors.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The workspace root has no git repository.
    #[error("no git repository at {path}")]
    NoRepository { path: PathBuf },

    /// Reading repository state failed.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Watches the checked-out branch of one repository.
#[derive(Debug)]
pub struct BranchTracker {
    head_path: PathBuf,
    current: Option<BranchName>,
}

impl BranchTracker {
    /// Opens the tracker for the repository at `repo_root`.
    ///
    /// Fails when no `.git` exists there, which disables tracking for the
    /// session.
    pub fn open(repo_root: &Path) -> Result<Self, TrackerError> {
        let head_path = resolve_git_dir(repo_root)?.join("HEAD");
        let current = read_head(&head_path)?;
        Ok(Self { head_path, current })
    }

    /// The last-known checked-out branch, or `None` on detached HEAD.
    pub fn current(&self) -> Option<&BranchName> {
        self.current.as_ref()
    }

    /// Re-reads HEAD and reports whether the branch name actually changed.
    ///
    /// Repository state changes for plenty of unrelated reasons (staging,
    /// commits); only a differing name counts as a branch change.
    pub fn poll(&mut self) -> Result<bool, TrackerError> {
        let branch = read_head(&self.head_path)?;
        if branch == self.current {
            return Ok(false);
        }
        self.current = branch;
        Ok(true)
    }
}

/// Locates the git directory for a workspace root, following a `.git`
/// worktree pointer file (`gitdir: <path>`) when present.
fn resolve_git_dir(repo_root: &Path) -> Result<PathBuf, TrackerError> {
    let dot_git = repo_root.join(".git");
    if dot_git.is_dir() {
        return Ok(dot_git);
    }
    if dot_git.is_file() {
        let content = fs::read_to_string(&dot_git).map_err(|source| TrackerError::Io {
            path: dot_git.clone(),
            source,
        })?;
        if let Some(target) = content.trim().strip_prefix("gitdir:") {
            let target = Path::new(target.trim());
            let resolved = if target.is_absolute() {
                target.to_path_buf()
            } else {
                repo_root.join(target)
            };
            return Ok(resolved);
        }
    }
    Err(TrackerError::NoRepository { path: dot_git })
}

fn read_head(head_path: &Path) -> Result<Option<BranchName>, TrackerError> {
    let content = fs::read_to_string(head_path).map_err(|source| TrackerError::Io {
        path: head_path.to_path_buf(),
        source,
    })?;
    Ok(parse_head(&content))
}

/// Extracts the branch name from HEAD content.
///
/// `ref: refs/heads/<name>` is a checked-out branch; anything else
/// (a bare commit hash, i.e. detached HEAD) is no active branch.
fn parse_head(content: &str) -> Option<BranchName> {
    let name = content.trim().strip_prefix("ref: refs/heads/")?;
    BranchName::new(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_repo(root: &Path, head: &str) {
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/HEAD"), head).unwrap();
    }

    #[test]
    fn parse_head_reads_branch_ref() {
        let branch = parse_head("ref: refs/heads/feature/login\n").unwrap();
        assert_eq!(branch.as_str(), "feature/login");
    }

    #[test]
    fn parse_head_treats_detached_as_none() {
        assert!(parse_head("a3f1c2d9e8b7a6f5c4d3e2b1a0f9e8d7c6b5a4f3\n").is_none());
        assert!(parse_head("").is_none());
    }

    #[test]
    fn open_reads_current_branch() {
        let temp = tempfile::tempdir().unwrap();
        init_repo(temp.path(), "ref: refs/heads/main\n");

        let tracker = BranchTracker::open(temp.path()).unwrap();
        assert_eq!(tracker.current().unwrap().as_str(), "main");
    }

    #[test]
    fn open_fails_without_repository() {
        let temp = tempfile::tempdir().unwrap();
        let result = BranchTracker::open(temp.path());
        assert!(matches!(result, Err(TrackerError::NoRepository { .. })));
    }

    #[test]
    fn poll_reports_change_only_when_name_differs() {
        let temp = tempfile::tempdir().unwrap();
        init_repo(temp.path(), "ref: refs/heads/main\n");
        let mut tracker = BranchTracker::open(temp.path()).unwrap();

        // Unrelated state change: same HEAD content.
        assert!(!tracker.poll().unwrap());

        fs::write(temp.path().join(".git/HEAD"), "ref: refs/heads/feature\n").unwrap();
        assert!(tracker.poll().unwrap());
        assert_eq!(tracker.current().unwrap().as_str(), "feature");

        assert!(!tracker.poll().unwrap());
    }

    #[test]
    fn poll_detects_detach_and_reattach() {
        let temp = tempfile::tempdir().unwrap();
        init_repo(temp.path(), "ref: refs/heads/main\n");
        let mut tracker = BranchTracker::open(temp.path()).unwrap();

        fs::write(
            temp.path().join(".git/HEAD"),
            "a3f1c2d9e8b7a6f5c4d3e2b1a0f9e8d7c6b5a4f3\n",
        )
        .unwrap();
        assert!(tracker.poll().unwrap());
        assert!(tracker.current().is_none());

        fs::write(temp.path().join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        assert!(tracker.poll().unwrap());
        assert_eq!(tracker.current().unwrap().as_str(), "main");
    }

    #[test]
    fn worktree_pointer_file_is_followed() {
        let temp = tempfile::tempdir().unwrap();
        let real_git = temp.path().join("repo/.git/worktrees/wt");
        fs::create_dir_all(&real_git).unwrap();
        fs::write(real_git.join("HEAD"), "ref: refs/heads/wt-branch\n").unwrap();

        let worktree = temp.path().join("wt");
        fs::create_dir_all(&worktree).unwrap();
        fs::write(
            worktree.join(".git"),
            format!("gitdir: {}\n", real_git.display()),
        )
        .unwrap();

        let tracker = BranchTracker::open(&worktree).unwrap();
        assert_eq!(tracker.current().unwrap().as_str(), "wt-branch");
    }
}
