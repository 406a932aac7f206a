//! Rendered-window management.
//!
//! The window is the prefix of the display index that has been turned into
//! formatted row views. It starts at twice the configured row count and
//! grows by one row count per scroll hint; the cursor is kept fractional so
//! fractional `rows` configurations land on the same boundaries every time.

use super::Table;
use crate::column::Column;
use crate::source::RecordSource;

use log::trace;

/// A rendered row: the stable row id plus one formatted cell per column.
///
/// Selection state is deliberately not part of the view; it changes without
/// the window changing, so renderers ask [`Table::is_selected`] per row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Stable row id (position in enumeration order)
    pub row: usize,
    /// Formatted cells, one per column
    pub cells: Vec<String>,
}

/// Window state: the fractional grow cursor and the built views.
#[derive(Debug, Default)]
pub(crate) struct Window {
    pub(crate) cursor: f64,
    pub(crate) views: Vec<RowView>,
}

impl Window {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl Table {
    /// Restarts the window at the initial size. Used at construction and
    /// after every index rebuild.
    pub(crate) fn reset_window(&mut self) {
        self.window.cursor = self.rows * 2.0;
        self.window.views.clear();
        self.fill_window();
    }

    /// Advances the window by one row step, unless everything is already
    /// rendered. Returns the number of rows appended.
    pub(crate) fn advance_window(&mut self) -> usize {
        let exhausted =
            self.source.is_materialized() && self.window.views.len() >= self.source.pulled();
        if exhausted {
            return 0;
        }
        self.window.cursor += self.rows;
        self.fill_window()
    }

    /// Builds views up to the cursor target, pulling a streaming source
    /// forward as needed. Append-only; never rebuilds existing views.
    pub(crate) fn fill_window(&mut self) -> usize {
        let target = self.window.cursor.max(0.0).floor() as usize;
        if !self.source.is_materialized() {
            self.source.pull_until(target);
        }
        self.sync_index_with_pulled();
        let limit = target.min(self.index.len());
        let from = self.window.views.len();
        for position in from..limit {
            let row = self.index[position];
            let view = build_view(&self.source, &self.columns, row);
            self.window.views.push(view);
        }
        let appended = limit.saturating_sub(from);
        if appended > 0 {
            trace!("window grew {from}..{limit} of {:?}", self.source.total());
        }
        appended
    }

    /// Extends the index identity-style over rows pulled since the last
    /// call. While unsorted, the index is exactly enumeration order; after
    /// a sort the source is fully materialized and this is a no-op.
    pub(crate) fn sync_index_with_pulled(&mut self) {
        while self.index.len() < self.source.pulled() {
            self.index.push(self.index.len());
        }
    }
}

/// Formats one row. Cells holding undefined values render empty without
/// consulting the column format.
fn build_view(source: &RecordSource, columns: &[Column], row: usize) -> RowView {
    let record = source.get(row);
    let cells = columns
        .iter()
        .map(|column| match record.get(&column.name) {
            Some(value) if value.is_defined() => column.format.apply(value, row),
            _ => String::new(),
        })
        .collect();
    RowView { row, cells }
}
