//! In-process git backend built on libgit2

use crate::error::{VcsError, VcsResult};
use crate::types::{CommitRecord, VersionControl};
use git2::{DiffOptions, ErrorCode, Oid, Repository, Sort, Tree};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Git repository with a working tree, opened once and queried per path
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepository {
    /// Find the repository containing `path`.
    ///
    /// Returns `Ok(None)` when there is no repository or it has no working
    /// tree; that is a normal configuration, not an error.
    pub fn discover(path: impl AsRef<Path>) -> VcsResult<Option<Self>> {
        match Repository::discover(path.as_ref()) {
            Ok(repo) => {
                let found = Self::from_repository(repo);
                if found.is_none() {
                    debug!("Ignoring bare repository at {}", path.as_ref().display());
                }
                Ok(found)
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Open the repository rooted exactly at `path`
    pub fn open(path: impl AsRef<Path>) -> VcsResult<Self> {
        let repo = Repository::open(path.as_ref())?;
        Self::from_repository(repo)
            .ok_or_else(|| git2::Error::from_str("bare repository not supported").into())
    }

    fn from_repository(repo: Repository) -> Option<Self> {
        let workdir = repo.workdir()?.to_path_buf();
        Some(Self { repo, workdir })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn head_tree(&self) -> VcsResult<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if is_missing_head(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl VersionControl for GitRepository {
    fn is_tracked(&self, path: &Path) -> VcsResult<bool> {
        let Some(rel) = relative_within(&self.workdir, path)? else {
            return Ok(false);
        };
        let mut index = self.repo.index()?;
        index.read(false)?;

        // stages 1-3 hold the sides of an unresolved conflict
        Ok((0..=3).any(|stage| index.get_path(&rel, stage).is_some()))
    }

    fn commit_history(&self, path: &Path) -> VcsResult<Vec<CommitRecord>> {
        let rel = workdir_relative(&self.workdir, path)?;

        // push_head on an unborn branch fails with a generic error code,
        // so ask for HEAD itself first
        let head = match self.repo.head() {
            Ok(head) => head.peel_to_commit()?.id(),
            Err(e) if is_missing_head(&e) => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TIME)?;
        walk.push(head)?;

        let mut history = Vec::new();
        for oid in walk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let entry = entry_id(&commit.tree()?, &rel)?;

            // a commit touches the path unless some parent already had the same blob
            let mut touched = commit.parent_count() > 0 || entry.is_some();
            for parent in commit.parents() {
                if entry_id(&parent.tree()?, &rel)? == entry {
                    touched = false;
                    break;
                }
            }

            if touched {
                let time = commit.time();
                history.push(CommitRecord::from_epoch(
                    oid.to_string(),
                    time.seconds(),
                    time.offset_minutes(),
                )?);
            }
        }

        Ok(history)
    }

    fn working_copy_differs(&self, path: &Path) -> VcsResult<bool> {
        let rel = workdir_relative(&self.workdir, path)?;
        let Some(tree) = self.head_tree()? else {
            // nothing committed yet, like `git diff HEAD` failing
            return Ok(true);
        };

        let mut opts = DiffOptions::new();
        opts.pathspec(rel.as_path())
            .disable_pathspec_match(true)
            .include_untracked(true);

        let diff = self
            .repo
            .diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))?;
        Ok(diff.deltas().len() > 0)
    }
}

fn is_missing_head(e: &git2::Error) -> bool {
    matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

fn entry_id(tree: &Tree<'_>, path: &Path) -> VcsResult<Option<Oid>> {
    match tree.get_path(path) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Express `path` relative to `workdir`, resolving relative inputs against
/// the process working directory first.
pub(crate) fn workdir_relative(workdir: &Path, path: &Path) -> VcsResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if let Ok(rel) = absolute.strip_prefix(workdir) {
        return Ok(rel.to_path_buf());
    }

    // symlinked temp dirs and the like only line up once canonicalized
    let canonical_workdir = workdir.canonicalize()?;
    let outside = || VcsError::OutsideRepository(path.to_path_buf());
    let canonical = absolute.canonicalize().map_err(|_| outside())?;
    canonical
        .strip_prefix(&canonical_workdir)
        .map(Path::to_path_buf)
        .map_err(|_| outside())
}

/// [`workdir_relative`] for tracking questions: a path outside the work
/// tree is simply not tracked, as `git ls-files --error-unmatch` reports.
pub(crate) fn relative_within(workdir: &Path, path: &Path) -> VcsResult<Option<PathBuf>> {
    match workdir_relative(workdir, path) {
        Ok(rel) => Ok(Some(rel)),
        Err(VcsError::OutsideRepository(outside)) => {
            debug!("{} lies outside {}", outside.display(), workdir.display());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VcsState;

    #[test]
    fn test_workdir_relative_absolute() {
        let rel = workdir_relative(Path::new("/site"), Path::new("/site/content/post.md")).unwrap();
        assert_eq!(rel, PathBuf::from("content/post.md"));
    }

    #[test]
    fn test_workdir_relative_outside() {
        let dir = std::env::temp_dir();
        let result = workdir_relative(&dir.join("definitely-not-here"), &dir);
        assert!(result.is_err());
    }

    #[test]
    fn test_relative_within_outside_is_none() {
        let site = tempfile::TempDir::new().unwrap();
        let elsewhere = tempfile::TempDir::new().unwrap();
        let stray = elsewhere.path().join("stray.md");
        std::fs::write(&stray, "stray").unwrap();

        assert!(relative_within(site.path(), &stray).unwrap().is_none());
        assert!(relative_within(site.path(), &site.path().join("post.md"))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_unborn_head_has_no_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        std::fs::write(dir.path().join("post.md"), "draft").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("post.md")).unwrap();
        index.write().unwrap();

        let git = GitRepository::from_repository(repo).unwrap();
        let state = VcsState::query(&git, &dir.path().join("post.md")).unwrap();
        assert!(state.tracked);
        assert!(state.history.is_empty());
        assert!(!state.working_copy_differs);
        assert!(git.commit_history(&dir.path().join("post.md")).unwrap().is_empty());
    }

    #[test]
    fn test_discover_in_current_directory() {
        // Not in a git repo is a valid outcome too
        match GitRepository::discover(".") {
            Ok(Some(repo)) => assert!(repo.workdir().is_absolute()),
            Ok(None) => {}
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }
}
