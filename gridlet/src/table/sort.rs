//! Sort state and index rebuilds.

use std::cmp::Ordering;

use log::debug;

use super::Table;
use crate::model::Value;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Table {
    /// Sorts the index by a column and direction.
    ///
    /// Sorting needs random access, so the source materializes first. The
    /// rebuild is stable: rows that compare equal keep their current
    /// relative order, and undefined values sink to the bottom regardless
    /// of direction. Selection membership survives; the range anchor and
    /// the window do not.
    pub(crate) fn apply_sort(&mut self, column: usize, direction: SortDirection) {
        self.source.materialize();
        self.sync_index_with_pulled();
        let name = self.columns[column].name.clone();
        let source = &self.source;
        self.index.sort_by(|&a, &b| {
            compare_cells(
                source.get(a).get(&name),
                source.get(b).get(&name),
                direction,
            )
        });
        self.sort = Some((column, direction));
        self.selection.reset_range();
        self.reset_window();
        self.push_change();
        debug!(
            "sorted by '{name}' {direction:?}: {} rows",
            self.index.len()
        );
    }

    /// Clears the sort, restoring enumeration order.
    pub(crate) fn clear_sort(&mut self) {
        self.sort = None;
        self.index = (0..self.source.pulled()).collect();
        self.selection.reset_range();
        self.reset_window();
        self.push_change();
        debug!("sort cleared: {} rows back in enumeration order", self.index.len());
    }
}

/// Column comparator: definedness first, then the natural order of the
/// values. Only the defined-vs-defined leg flips with direction, so
/// undefined values hold the bottom either way.
fn compare_cells(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a_defined = a.is_some_and(Value::is_defined);
    let b_defined = b.is_some_and(Value::is_defined);
    match (a_defined, b_defined) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
        (true, true) => {
            let ordering = match (a, b) {
                (Some(a), Some(b)) => a.natural_cmp(b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            };
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}
