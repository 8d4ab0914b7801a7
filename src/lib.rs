//! # puppet - Multi-Repository Command Runner
//!
//! `puppet` treats every git repository directly under the current directory as
//! a puppet and drives them together: one shell command in all of them, a
//! stash-and-pull of each current branch, or a switch to a saved set of branches.
//!
//! ## Features
//!
//! - **Batch Commands**: Run a shell command concurrently in every repository
//! - **Sync**: Stash, pull the current branch and reinstall dependencies everywhere
//! - **Branch Snapshots**: Save the current branch of every repository under a name
//!   and check those branches out again later
//! - **Filtering**: Restrict any operation to a subset of repositories by name
//!
//! ## Quick Start
//!
//! ```bash
//! cd ~/work            # contains web/, api/, db/ ... each a git repository
//! puppet branches      # current branch of every repository
//! puppet command "git fetch --all" --filter web api
//! puppet save release  # remember the current branches
//! puppet run release   # check them out again
//! ```
//!
//! ## Architecture
//!
//! The crate is organized using clean architecture principles:
//!
//! - [`domain`]: Repositories, branch snapshots, configurations and batch results
//! - [`application`]: Discovery, batch execution and configuration use cases
//! - [`infrastructure`]: Git queries, shell execution and the configuration store
//! - [`presentation`]: CLI interface and terminal output
//! - [`common`]: Shared error handling and logging setup
//!
//! ## Error Handling
//!
//! - [`common::error::PuppetError`]: Main error type with detailed context
//! - [`common::result::PuppetResult`]: Type alias for `Result<T, PuppetError>`
//!
//! A failing repository never aborts a batch: its error is recorded in the
//! [`domain::entities::BatchResult`] and reported once every repository settled.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use puppet::application::services::NoopProgress;
//! use puppet::application::use_cases::{BatchExecutor, DiscoverReposUseCase, ExecutorConfig};
//! use puppet::infrastructure::{GitBranchInspector, SystemShell};
//!
//! # async fn example() -> puppet::Result<()> {
//! let inspector = Arc::new(GitBranchInspector::new());
//! let discovery = DiscoverReposUseCase::new(inspector.clone()).execute(Path::new("."), None)?;
//!
//! let executor = BatchExecutor::new(Arc::new(SystemShell::new()), inspector, ExecutorConfig::default());
//! let result = executor
//!     .run_batch(Some("git status --short"), &discovery.repos, &mut NoopProgress)
//!     .await;
//!
//! println!("{} succeeded, {} failed", result.succeeded.len(), result.failed.len());
//! # Ok(())
//! # }
//! ```

// Documentation attributes
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::PuppetError;
pub use crate::common::result::PuppetResult as Result;
