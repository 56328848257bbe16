//! Minimal edit scripts between ordered sequences.
//!
//! A patch is a flat list of [`PatchItem`] steps that transforms a left
//! sequence into a right sequence when replayed. [`myers`] computes a
//! shortest such script; [`render`] turns one into the line-per-step text
//! used in mismatch reports. Everything here is pure and reentrant.

pub mod myers;
pub mod render;

#[cfg(test)]
pub(crate) mod bfs;

/// One step of a patch transforming a left sequence into a right sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchItem<T> {
    /// Keep the current left element.
    Keep,
    /// Drop the current left element.
    Delete,
    /// Insert an element taken from the right sequence.
    Add(T),
}

/// An ordered edit script.
pub type Patch<T> = Vec<PatchItem<T>>;

/// Replays `patch` against `left`, reproducing the right sequence the patch
/// was computed from.
///
/// The patch must consume `left` exactly: `Keep` and `Delete` each advance
/// one left element, `Add` injects its own. Patches produced by
/// [`myers::diff`] always satisfy this.
pub fn replay<T: Clone>(left: &[T], patch: &Patch<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(left.len());
    let mut index = 0;
    for item in patch {
        match item {
            PatchItem::Keep => {
                out.push(left[index].clone());
                index += 1;
            }
            PatchItem::Delete => {
                index += 1;
            }
            PatchItem::Add(element) => out.push(element.clone()),
        }
    }
    out
}
