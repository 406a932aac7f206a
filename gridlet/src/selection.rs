//! Selection state for the table engine.
//!
//! Selection tracks row ids, which stay stable across resorts; display-order
//! questions are answered against the current index permutation, passed in by
//! the caller.

use std::collections::HashSet;

/// Row-id selection state: the member set plus the range anchor and head.
///
/// The anchor is where a shift-range starts; the head is where the previous
/// shift-range ended. Extending a range first unselects the whole previous
/// anchor-to-head span, then selects the new one, so walking a shift-click
/// back over a shorter span releases the rows it no longer covers.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected row ids
    selected: HashSet<usize>,
    /// Range start (Shift+click starting point)
    anchor: Option<usize>,
    /// Where the last range ended
    head: Option<usize>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a row id is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selected.contains(&row)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get the range anchor.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// Selected row ids in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Selected row ids ordered by the given index permutation.
    pub fn in_display_order(&self, index: &[usize]) -> Vec<usize> {
        index
            .iter()
            .copied()
            .filter(|row| self.selected.contains(row))
            .collect()
    }

    /// Clear all selection and the range state.
    /// Returns the row ids that were deselected.
    pub fn clear(&mut self) -> Vec<usize> {
        self.anchor = None;
        self.head = None;
        self.selected.drain().collect()
    }

    /// Toggle a row's membership (plain click, checkbox semantics).
    ///
    /// Selecting re-anchors the range at the row; unselecting drops the
    /// range state entirely. Returns whether the row is now selected.
    pub fn toggle(&mut self, row: usize) -> bool {
        if self.selected.remove(&row) {
            self.anchor = None;
            self.head = None;
            false
        } else {
            self.selected.insert(row);
            self.anchor = Some(row);
            self.head = Some(row);
            true
        }
    }

    /// Extend a range to `row` (Shift+click behavior).
    ///
    /// With an established range, the previous anchor-to-head span is
    /// unselected before the new anchor-to-row span is selected. Without
    /// one, the anchor seeds from the first selected row in display order,
    /// falling back to the first displayed row.
    ///
    /// Returns (added, removed) row ids; a row released and re-covered by
    /// the new span appears in both.
    pub fn extend_to(&mut self, row: usize, index: &[usize]) -> (Vec<usize>, Vec<usize>) {
        let mut removed = Vec::new();
        let anchor = match (self.anchor, self.head) {
            (Some(anchor), Some(head)) => {
                for r in span(index, anchor, head) {
                    if self.selected.remove(&r) {
                        removed.push(r);
                    }
                }
                anchor
            }
            _ => {
                let seed = index
                    .iter()
                    .copied()
                    .find(|r| self.selected.contains(r))
                    .or_else(|| index.first().copied());
                let Some(seed) = seed else {
                    return (Vec::new(), removed);
                };
                self.anchor = Some(seed);
                seed
            }
        };
        self.head = Some(row);
        let mut added = Vec::new();
        for r in span(index, anchor, row) {
            if self.selected.insert(r) {
                added.push(r);
            }
        }
        (added, removed)
    }

    /// Select every row id in the index. The range state is left alone.
    /// Returns the row ids that were newly selected.
    pub fn select_all(&mut self, index: &[usize]) -> Vec<usize> {
        let mut added = Vec::new();
        for &row in index {
            if self.selected.insert(row) {
                added.push(row);
            }
        }
        added
    }

    /// Replace the membership with exactly `target`, leaving the range state
    /// alone. Returns (added, removed) row ids.
    pub fn replace(&mut self, target: HashSet<usize>) -> (Vec<usize>, Vec<usize>) {
        let removed: Vec<usize> = self.selected.difference(&target).copied().collect();
        let added: Vec<usize> = target.difference(&self.selected).copied().collect();
        self.selected = target;
        (added, removed)
    }

    /// Drop the range state after an index rebuild.
    pub fn reset_range(&mut self) {
        self.anchor = None;
        self.head = None;
    }
}

/// Inclusive span between two row ids, in display order.
fn span(index: &[usize], a: usize, b: usize) -> Vec<usize> {
    let a_pos = index.iter().position(|&r| r == a);
    let b_pos = index.iter().position(|&r| r == b);
    debug_assert!(
        a_pos.is_some() && b_pos.is_some(),
        "span endpoints {a} and {b} must be in the index"
    );
    match (a_pos, b_pos) {
        (Some(i), Some(j)) => {
            let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
            index[lo..=hi].to_vec()
        }
        _ => Vec::new(),
    }
}
