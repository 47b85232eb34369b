//! devolv-commit - summarize staged git changes as a commit message.
//!
//! # Overview
//!
//! The staged diff is split per file, each file's changed lines are classified
//! (new or deleted modules, tests, added and removed classes, functions, and
//! methods), and the resulting actions are deduplicated and rendered as a
//! conventional-commit style message.

pub mod commit;
pub mod diff;
pub mod error;
pub mod git;
pub mod hook;

// Re-export commonly used types
pub use commit::{Action, Category, CommitType, generate_commit_message};
pub use diff::{FileChangeRecord, split_diff};
pub use error::{CommitError, GitError, HookError};
