//! Unified diff parsing: per-file segmentation and line filtering.

pub mod lines;
pub mod segment;

pub use lines::{FilteredLines, LineClass, classify_line, filter_lines, is_noise};
pub use segment::{FileChangeRecord, split_diff};
