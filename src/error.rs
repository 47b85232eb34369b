//! Error types for devolv-commit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from locating the repository and its index.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to open index file {}: {source}", path.display())]
    OpenIndex {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },
}

/// Errors from reading staged changes and committing them.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to collect staged diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),
}

/// Errors from installing the commit message hook.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("A different hook already exists at {}. Use --force to overwrite.", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Failed to read existing hook: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write hook: {0}")]
    WriteFailed(#[source] std::io::Error),
}
