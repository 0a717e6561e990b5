//! Version control queries used to date content
//!
//! A [`VersionControl`] handle answers three questions about a path: is it
//! tracked, which commits touched it (newest first), and does the working copy
//! differ from the last commit. Two backends are provided:
//!
//! - [`GitRepository`] reads the repository in-process through libgit2
//! - [`GitCli`] shells out to `git` and reads answers from exit codes
//!
//! ```no_run
//! use vcs::{GitRepository, VcsState};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! if let Some(repo) = GitRepository::discover(".")? {
//!     let state = VcsState::query(&repo, Path::new("content/post.md"))?;
//!     println!("tracked: {}, commits: {}", state.tracked, state.history.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Nothing here writes to the repository.

pub mod cli;
pub mod error;
pub mod repository;
pub mod types;

pub use cli::GitCli;
pub use error::{VcsError, VcsResult};
pub use repository::GitRepository;
pub use types::{CommitRecord, VcsState, VersionControl};
