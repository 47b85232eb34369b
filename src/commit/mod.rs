//! Rule-based commit messages from staged diffs.

pub mod action;
pub mod classify;
pub mod message;

pub use action::{Action, Category, CommitType};
pub use classify::{FileStatus, Symbol, SymbolScanner, Symbols, classify_file, is_test_file};
pub use message::{collect_actions, compose, dedup_actions, generate_commit_message};
