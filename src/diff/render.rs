//! Textual rendering of a patch, one line per step.

use std::fmt::Display;

use super::{Patch, PatchItem};

/// Renders `patch` against the `left` sequence it was computed from. Kept
/// elements print bare, deletions with a `- ` prefix, additions with `+ `.
pub fn render<T: Display>(left: &[T], patch: &Patch<T>) -> String {
    let mut lines = Vec::with_capacity(patch.len());
    let mut index = 0;
    for item in patch {
        match item {
            PatchItem::Keep => {
                lines.push(left[index].to_string());
                index += 1;
            }
            PatchItem::Delete => {
                lines.push(format!("- {}", left[index]));
                index += 1;
            }
            PatchItem::Add(element) => lines.push(format!("+ {element}")),
        }
    }
    lines.join("\n")
}
