mod common;

use common::{at, Site};
use content::{ContentItem, Signals};
use gittime::{register, GitTimeConfig, GitTimePlugin, VcsBackend};
use serial_test::serial;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const C1: i64 = 1_609_459_200;
const C2: i64 = 1_622_505_600;

/// Restores the process working directory on drop
struct CwdGuard(PathBuf);

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        Self(previous)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.0);
    }
}

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn utc_config() -> GitTimeConfig {
    GitTimeConfig::default()
        .with_timezone("UTC")
        .with_system_timezone("UTC")
}

#[test]
#[serial]
fn test_register_outside_repository_is_inert() {
    let dir = TempDir::new().unwrap();
    let _cwd = CwdGuard::enter(dir.path());
    std::fs::write("post.md", "hello").unwrap();

    let plugin = GitTimePlugin::from_config(utc_config()).unwrap();
    assert!(!plugin.is_active());

    let mut signals = Signals::new();
    register(&mut signals, utc_config()).unwrap();
    assert_eq!(signals.listener_count(), 1);

    let mut item = ContentItem::article("post.md");
    signals.content_initialized(&mut item).unwrap();
    assert!(item.date.is_none());
    assert!(item.modified.is_none());
}

#[test]
#[serial]
fn test_register_with_relative_paths() {
    let site = Site::new();
    site.commit("content/post.md", "v1", C1);
    site.commit("content/post.md", "v2 longer", C2);
    let _cwd = CwdGuard::enter(site.dir.path());

    let mut signals = Signals::new();
    register(&mut signals, utc_config()).unwrap();

    let mut item = ContentItem::article("content/post.md");
    signals.content_initialized(&mut item).unwrap();
    assert_eq!(item.date, Some(at(C1).fixed_offset()));
    assert_eq!(item.modified, Some(at(C2).fixed_offset()));
}

#[test]
#[serial]
fn test_register_from_subdirectory() {
    let site = Site::new();
    site.commit("content/post.md", "v1", C1);
    let _cwd = CwdGuard::enter(&site.path("content"));

    let plugin = GitTimePlugin::from_config(utc_config()).unwrap();
    assert!(plugin.is_active());

    let mut item = ContentItem::article("post.md");
    plugin.apply(&mut item).unwrap();
    assert_eq!(item.date, Some(at(C1).fixed_offset()));
}

#[test]
fn test_disabled_config_does_not_open_repository() {
    let plugin = GitTimePlugin::from_config(
        GitTimeConfig::default()
            .with_enabled(false)
            .with_repository_root("/definitely/not/a/real/path"),
    )
    .unwrap();
    assert!(!plugin.is_active());
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = GitTimePlugin::from_config(GitTimeConfig::default().with_timezone("Not/AZone"));
    assert!(result.is_err());
}

#[test]
fn test_cli_backend_matches_libgit2() {
    if !git_available() {
        return;
    }

    let site = Site::new();
    site.commit("content/post.md", "v1", C1);
    let path = site.commit("content/post.md", "v2 longer", C2);

    let plugin = GitTimePlugin::from_config(
        utc_config()
            .with_backend(VcsBackend::Cli)
            .with_repository_root(site.dir.path()),
    )
    .unwrap();
    assert!(plugin.is_active());

    let mut via_cli = ContentItem::article(&path);
    plugin.apply(&mut via_cli).unwrap();

    let mut via_libgit2 = ContentItem::article(&path);
    site.plugin().apply(&mut via_libgit2).unwrap();

    assert_eq!(via_cli.date, via_libgit2.date);
    assert_eq!(via_cli.modified, via_libgit2.modified);
    assert_eq!(via_cli.date, Some(at(C1).fixed_offset()));
}
