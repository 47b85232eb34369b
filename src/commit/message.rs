//! Commit message composition from classified actions.

use std::collections::HashSet;

use tracing::debug;

use crate::commit::action::{Action, CommitType};
use crate::commit::classify::classify_file;
use crate::diff::split_diff;

/// Bullets shown under a single-type "multiple changes" header.
const MAX_SINGLE_TYPE_BULLETS: usize = 5;

/// Bullets shown in a multi-type summary.
const MAX_SUMMARY_BULLETS: usize = 6;

/// Trailing bullet marking truncated output.
const MORE_BULLET: &str = "- ...and more";

/// Classify every file in a diff, concatenating actions in file order.
pub fn collect_actions(diff: &str) -> Vec<Action> {
    split_diff(diff).iter().flat_map(classify_file).collect()
}

/// Generate a commit message from unified diff text.
///
/// Returns `None` when there is nothing to report.
pub fn generate_commit_message(diff: &str) -> Option<String> {
    if diff.trim().is_empty() {
        return None;
    }
    let actions = collect_actions(diff);
    debug!("Collected {} actions", actions.len());
    compose(&actions)
}

/// Drop duplicate actions, keeping first occurrences. Texts differing only by
/// a trailing period are duplicates.
pub fn dedup_actions(actions: &[Action]) -> Vec<(CommitType, String)> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::new();

    for action in actions {
        let key = (action.commit_type(), action.normalized_text().to_string());
        if seen.insert(key.clone()) {
            deduped.push(key);
        }
    }

    deduped
}

/// Group texts by commit type in order of first appearance.
fn group_by_type(entries: &[(CommitType, String)]) -> Vec<(CommitType, Vec<&str>)> {
    let mut groups: Vec<(CommitType, Vec<&str>)> = Vec::new();

    for (commit_type, text) in entries {
        match groups.iter_mut().find(|group| group.0 == *commit_type) {
            Some((_, texts)) => texts.push(text.as_str()),
            None => groups.push((*commit_type, vec![text.as_str()])),
        }
    }

    groups
}

/// Render actions into the final message.
///
/// One commit type renders as a subject line (or a short bullet list past
/// four items); several types render as a capped "Summary of changes" list.
pub fn compose(actions: &[Action]) -> Option<String> {
    let deduped = dedup_actions(actions);
    if deduped.is_empty() {
        return None;
    }

    let groups = group_by_type(&deduped);
    if let [(commit_type, texts)] = groups.as_slice() {
        return Some(render_single_type(*commit_type, texts));
    }

    Some(render_summary(&deduped))
}

fn render_single_type(commit_type: CommitType, texts: &[&str]) -> String {
    match texts {
        [only] => format!("{commit_type}: {only}."),
        [first, second] => format!("{commit_type}: {first} and {second}."),
        [init @ .., last] if texts.len() <= 4 => {
            format!("{commit_type}: {}, and {last}.", init.join(", "))
        }
        _ => {
            let mut lines = vec![format!("{commit_type}: multiple changes.")];
            lines.extend(
                texts
                    .iter()
                    .take(MAX_SINGLE_TYPE_BULLETS)
                    .map(|text| format!("- {text}.")),
            );
            lines.push(MORE_BULLET.to_string());
            lines.join("\n")
        }
    }
}

fn render_summary(entries: &[(CommitType, String)]) -> String {
    let mut lines = vec!["Summary of changes:".to_string()];
    lines.extend(
        entries
            .iter()
            .take(MAX_SUMMARY_BULLETS)
            .map(|(commit_type, text)| format!("- {commit_type}: {text}.")),
    );
    if entries.len() > MAX_SUMMARY_BULLETS {
        lines.push(MORE_BULLET.to_string());
    }
    lines.join("\n")
}
