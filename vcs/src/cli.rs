//! Git backend that runs the `git` binary
//!
//! Each query is a short-lived subprocess. Exit codes are answers: a failing
//! `ls-files --error-unmatch` means "not tracked", a failing `diff --quiet`
//! means "differs", a failing `log` means "no history". Only a failure to
//! spawn `git` at all is reported as an error.

use crate::error::{VcsError, VcsResult};
use crate::repository::{relative_within, workdir_relative};
use crate::types::{CommitRecord, VersionControl};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Handle on a work tree queried through the git command line
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    program: PathBuf,
}

impl GitCli {
    /// Locate the work tree containing `path` with `git rev-parse`.
    pub fn discover(path: impl AsRef<Path>) -> VcsResult<Option<Self>> {
        Self::discover_with(path, "git")
    }

    /// Same as [`GitCli::discover`] with an explicit git executable
    pub fn discover_with(
        path: impl AsRef<Path>,
        program: impl Into<PathBuf>,
    ) -> VcsResult<Option<Self>> {
        let program = program.into();
        let output = Command::new(&program)
            .args(["rev-parse", "--show-toplevel"])
            .current_dir(path.as_ref())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| VcsError::CommandFailed {
                command: format!("{} rev-parse --show-toplevel", program.display()),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            debug!("No git work tree at {}", path.as_ref().display());
            return Ok(None);
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            workdir: PathBuf::from(root),
            program,
        }))
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Run `git <args> -- <path>` from the work tree root
    fn run(&self, args: &[&str], rel: &Path) -> VcsResult<Output> {
        Command::new(&self.program)
            .args(args)
            .arg("--")
            .arg(rel)
            .current_dir(&self.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| VcsError::CommandFailed {
                command: format!("git {} -- {}", args.join(" "), rel.display()),
                reason: e.to_string(),
            })
    }
}

impl VersionControl for GitCli {
    fn is_tracked(&self, path: &Path) -> VcsResult<bool> {
        // git refuses paths outside the work tree with a fatal error
        let Some(rel) = relative_within(&self.workdir, path)? else {
            return Ok(false);
        };
        let output = self.run(&["ls-files", "--error-unmatch"], &rel)?;
        Ok(output.status.success())
    }

    fn commit_history(&self, path: &Path) -> VcsResult<Vec<CommitRecord>> {
        let rel = workdir_relative(&self.workdir, path)?;
        let output = self.run(&["log", "--date=raw", "--format=%H %cd"], &rel)?;
        if !output.status.success() {
            return Ok(Vec::new());
        }

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse_log_line)
            .collect()
    }

    fn working_copy_differs(&self, path: &Path) -> VcsResult<bool> {
        let rel = workdir_relative(&self.workdir, path)?;
        let output = self.run(&["diff", "--quiet", "HEAD"], &rel)?;
        Ok(!output.status.success())
    }
}

/// Parse one `%H %cd` line produced with `--date=raw`, e.g.
/// `3f2a... 1677668400 +0200`
fn parse_log_line(line: &str) -> VcsResult<CommitRecord> {
    let unexpected = || VcsError::UnexpectedOutput(line.to_string());

    let mut parts = line.split_whitespace();
    let id = parts.next().ok_or_else(unexpected)?;
    let seconds: i64 = parts
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(unexpected)?;
    let offset = parts.next().ok_or_else(unexpected)?;
    let offset_minutes = parse_offset(offset).ok_or_else(unexpected)?;

    CommitRecord::from_epoch(id, seconds, offset_minutes)
}

/// `+hhmm` / `-hhmm` to signed minutes
fn parse_offset(offset: &str) -> Option<i32> {
    let (sign, digits) = match offset.split_at_checked(1)? {
        ("+", digits) => (1, digits),
        ("-", digits) => (-1, digits),
        _ => return None,
    };
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    Some(sign * (hours * 60 + minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("+0000"), Some(0));
        assert_eq!(parse_offset("+0200"), Some(120));
        assert_eq!(parse_offset("-0530"), Some(-330));
        assert_eq!(parse_offset("0200"), None);
        assert_eq!(parse_offset("+2"), None);
        assert_eq!(parse_offset("+02:00"), None);
        assert_eq!(parse_offset(""), None);
    }

    #[test]
    fn test_parse_log_line() {
        let record =
            parse_log_line("3f2a9c0e1b2d3f4a5b6c7d8e9f0a1b2c3d4e5f60 1677668400 +0200").unwrap();
        assert_eq!(record.id, "3f2a9c0e1b2d3f4a5b6c7d8e9f0a1b2c3d4e5f60");
        assert_eq!(record.utc_offset_seconds, 7200);
        assert_eq!(record.committed_at().timestamp(), 1_677_668_400);
    }

    #[test]
    fn test_parse_log_line_rejects_garbage() {
        assert!(parse_log_line("abc").is_err());
        assert!(parse_log_line("abc notanumber +0000").is_err());
        assert!(parse_log_line("abc 1677668400").is_err());
    }

    #[test]
    fn test_discover_with_missing_binary() {
        let result = GitCli::discover_with(".", "/nonexistent/git-binary");
        assert!(matches!(result, Err(VcsError::CommandFailed { .. })));
    }
}
