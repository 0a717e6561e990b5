#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use git2::{Repository, Signature, Time};
use gittime::{GitTimeConfig, GitTimePlugin, TimestampResolver};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vcs::GitRepository;

/// Scratch site with its own git repository
pub struct Site {
    pub dir: TempDir,
    pub repo: Repository,
}

impl Site {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        Self { dir, repo }
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn stage(&self, rel: &str) {
        let mut index = self.repo.index().unwrap();
        index.add_path(Path::new(rel)).unwrap();
        index.write().unwrap();
    }

    /// Write, stage and commit `rel` at `seconds` since the epoch
    pub fn commit(&self, rel: &str, contents: &str, seconds: i64) -> PathBuf {
        self.commit_at(rel, contents, seconds, 0)
    }

    /// Like [`Site::commit`], with the committer `offset_minutes` east of UTC
    pub fn commit_at(&self, rel: &str, contents: &str, seconds: i64, offset_minutes: i32) -> PathBuf {
        let path = self.write(rel, contents);
        self.stage(rel);

        let mut index = self.repo.index().unwrap();
        let tree = self.repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::new("Author", "author@example.com", &Time::new(seconds, offset_minutes)).unwrap();
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, "edit", &tree, &parents)
            .unwrap();
        path
    }

    /// Plugin over this site's repository, with UTC as both system and
    /// display zone so instants come back unchanged
    pub fn plugin(&self) -> GitTimePlugin {
        self.plugin_with(
            GitTimeConfig::default()
                .with_timezone("UTC")
                .with_system_timezone("UTC"),
        )
    }

    pub fn plugin_with(&self, config: GitTimeConfig) -> GitTimePlugin {
        let repo = GitRepository::open(self.dir.path()).unwrap();
        GitTimePlugin::with_resolver(config, TimestampResolver::with_vcs(repo))
    }
}

pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(seconds, 0).unwrap()
}

/// A date the build might have assigned before plugins ran
pub fn framework_default() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(1999, 12, 31, 23, 59, 59)
        .unwrap()
}
