//! Shortest edit script search over the edit graph.
//!
//! The O((N+M)·D) greedy algorithm: for each edit distance `d` and each
//! diagonal `k`, track the furthest-reaching x coordinate, sliding down runs
//! of equal elements (snakes) before recording the endpoint. The endpoint
//! array is snapshotted per distance level so the path can be rebuilt
//! backwards once the bottom-right corner of the graph is reached. Cost is
//! proportional to the edit distance, not the sequence lengths.

use super::{Patch, PatchItem};

/// Computes a shortest edit script turning `left` into `right` under the
/// given equality.
///
/// Total for finite inputs: a path always exists within
/// `|left| + |right|` edits.
pub fn diff<T, F>(left: &[T], right: &[T], equals: F) -> Patch<T>
where
    T: Clone,
    F: Fn(&T, &T) -> bool,
{
    if left.is_empty() {
        return right.iter().cloned().map(PatchItem::Add).collect();
    }
    if right.is_empty() {
        return left.iter().map(|_| PatchItem::Delete).collect();
    }

    let m = left.len();
    let n = right.len();
    let max_d = m + n;
    let mut v = Endpoints::new(max_d);
    v.set(1, 0);
    let mut trace: Vec<Endpoints> = Vec::new();

    for d in 0..=max_d as isize {
        trace.push(v.clone());
        let mut k = -d;
        while k <= d {
            let mut x = if k == -d || (k != d && v.get(k - 1) < v.get(k + 1)) {
                v.get(k + 1)
            } else {
                v.get(k - 1) + 1
            };
            let mut y = (x as isize - k) as usize;
            while x < m && y < n && equals(&left[x], &right[y]) {
                x += 1;
                y += 1;
            }
            v.set(k, x);
            if x >= m && y >= n {
                return backtrack(right, &trace, x, y);
            }
            k += 2;
        }
    }
    unreachable!("edit graph search exhausted without reaching the corner")
}

/// Walks the endpoint snapshots backwards from the corner, emitting the
/// diagonal run of each level as `Keep` steps and the single non-diagonal
/// move as `Add` or `Delete`. Ties prefer the `k + 1` neighbor (an
/// insertion origin) when `k == -d` or its prior x is larger.
fn backtrack<T: Clone>(right: &[T], trace: &[Endpoints], x: usize, y: usize) -> Patch<T> {
    let mut items: Patch<T> = Vec::new();
    let mut x = x as isize;
    let mut y = y as isize;
    let mut d = trace.len() - 1;

    while x != 0 || y != 0 {
        let v = &trace[d];
        let k = x - y;
        let di = d as isize;
        let prev_k = if k == -di || (k != di && v.get(k - 1) < v.get(k + 1)) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = v.get(prev_k) as isize;
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            items.push(PatchItem::Keep);
            x -= 1;
            y -= 1;
        }
        if x <= 0 && y <= 0 {
            break;
        }
        if x != prev_x {
            items.push(PatchItem::Delete);
        } else {
            items.push(PatchItem::Add(right[prev_y as usize].clone()));
        }
        x = prev_x;
        y = prev_y;
        d -= 1;
    }

    items.reverse();
    items
}

/// Furthest-reaching x per diagonal, indexable by signed `k`.
#[derive(Clone)]
struct Endpoints {
    slots: Vec<usize>,
    offset: isize,
}

impl Endpoints {
    fn new(max_d: usize) -> Self {
        Self {
            slots: vec![0; 2 * max_d + 1],
            offset: max_d as isize,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.slots[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, x: usize) {
        self.slots[(k + self.offset) as usize] = x;
    }
}
