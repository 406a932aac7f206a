//! The table engine: windowing, sorting, and selection over a record source.

mod events;
mod sort;
mod window;

pub use sort::SortDirection;
pub use window::RowView;

use std::collections::HashMap;
use std::collections::HashSet;

use log::trace;

use crate::column;
use crate::column::Align;
use crate::column::Column;
use crate::error::ConfigError;
use crate::format::CellFormat;
use crate::model::Record;
use crate::selection::Selection;
use crate::source::RecordSource;
use window::Window;

/// Column sizing strategy hint for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Columns sized up front, evenly
    Fixed,
    /// Content-driven column widths
    Auto,
}

/// Table configuration.
///
/// Everything is optional; the defaults give a 11.5-row window over columns
/// derived from the data. Configuration problems (unknown or duplicate
/// column names) surface as [`ConfigError`] from [`Table::new`].
///
/// # Examples
///
/// ```
/// use gridlet::column::Align;
/// use gridlet::table::TableConfig;
///
/// let config = TableConfig::default()
///     .columns(["name", "score"])
///     .sort("score")
///     .reverse()
///     .align("name", Align::Center);
/// ```
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Explicit column list; derived from the data when absent
    pub columns: Option<Vec<String>>,
    /// Rows shown per screen; fractional values leave a partial row peeking
    pub rows: f64,
    /// Column to sort by initially
    pub sort: Option<String>,
    /// Sort descending initially; without `sort`, reverse enumeration order
    pub reverse: bool,
    /// Per-column format overrides
    pub format: HashMap<String, CellFormat>,
    /// Per-column alignment overrides
    pub align: HashMap<String, Align>,
    /// Per-column width hints
    pub width: HashMap<String, u16>,
    /// Overall width hint for the renderer
    pub table_width: Option<u16>,
    /// Sizing strategy; defaults by column count
    pub layout: Option<Layout>,
    /// Initial selection, matched by record equality
    pub value: Option<Vec<Record>>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: None,
            rows: 11.5,
            sort: None,
            reverse: false,
            format: HashMap::new(),
            align: HashMap::new(),
            width: HashMap::new(),
            table_width: None,
            layout: None,
            value: None,
        }
    }
}

impl TableConfig {
    /// Set an explicit column list.
    pub fn columns(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the rows shown per screen.
    pub fn rows(mut self, rows: f64) -> Self {
        self.rows = rows;
        self
    }

    /// Sort by a column initially.
    pub fn sort(mut self, column: impl Into<String>) -> Self {
        self.sort = Some(column.into());
        self
    }

    /// Start the initial sort descending, or reverse enumeration order when
    /// no sort column is set.
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Override a column's format.
    pub fn format(mut self, column: impl Into<String>, format: CellFormat) -> Self {
        self.format.insert(column.into(), format);
        self
    }

    /// Override a column's alignment.
    pub fn align(mut self, column: impl Into<String>, align: Align) -> Self {
        self.align.insert(column.into(), align);
        self
    }

    /// Set a column's width hint.
    pub fn width(mut self, column: impl Into<String>, width: u16) -> Self {
        self.width.insert(column.into(), width);
        self
    }

    /// Set the overall width hint.
    pub fn table_width(mut self, width: u16) -> Self {
        self.table_width = Some(width);
        self
    }

    /// Set the sizing strategy.
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Select records initially, matched by equality.
    pub fn value(mut self, records: Vec<Record>) -> Self {
        self.value = Some(records);
        self
    }
}

/// The exposed value: selected records, or every record when nothing is
/// selected, in display order, with the column names attached.
#[derive(Debug, Clone, PartialEq)]
pub struct TableValue {
    /// Records in display order
    pub records: Vec<Record>,
    /// Resolved column names
    pub columns: Vec<String>,
}

impl TableValue {
    /// Number of records in the value.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the value carries no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IntoIterator for TableValue {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// The tabular-data widget engine.
///
/// A `Table` owns a [`RecordSource`] and maintains three pieces of state on
/// top of it: the display index (a permutation of row ids), the selection,
/// and the rendered window. Renderers read [`visible_rows`](Table::visible_rows)
/// and the header accessors, feed interactions back through the `click_*`
/// entry points, and drain [`take_changes`](Table::take_changes) to learn
/// when the exposed value moved.
///
/// # Example
///
/// ```
/// use gridlet::model::Record;
/// use gridlet::source::RecordSource;
/// use gridlet::table::{Table, TableConfig};
///
/// let source = RecordSource::from_records(vec![
///     Record::new().set("name", "Ada").set("score", 9i64),
///     Record::new().set("name", "Grace").set("score", 11i64),
/// ]);
/// let table = Table::new(source, TableConfig::default().sort("score")).unwrap();
/// assert_eq!(table.visible_rows()[0].row, 0);
/// ```
#[derive(Debug)]
pub struct Table {
    columns: Vec<Column>,
    layout: Layout,
    table_width: Option<u16>,
    rows: f64,
    source: RecordSource,
    /// Display order: a permutation of the pulled row ids.
    index: Vec<usize>,
    sort: Option<(usize, SortDirection)>,
    selection: Selection,
    window: Window,
    pending_changes: usize,
}

impl Table {
    /// Builds a table over a source.
    ///
    /// Pulls the initial window, resolves columns against the pulled prefix,
    /// then applies the initial sort, reverse, and selection options. Unknown
    /// or duplicate column names in the configuration are fatal here.
    pub fn new(source: RecordSource, config: TableConfig) -> Result<Self, ConfigError> {
        let TableConfig {
            columns: explicit,
            rows,
            sort,
            reverse,
            format,
            align,
            width,
            table_width,
            layout,
            value,
        } = config;

        let mut source = source;
        let initial = (rows * 2.0).max(0.0).floor() as usize;
        source.pull_until(initial);

        let columns = column::resolve(
            explicit.as_deref(),
            source.records(),
            column::Overrides {
                format: &format,
                align: &align,
                width: &width,
            },
        )?;

        let sort_column = match &sort {
            Some(name) => Some(
                columns
                    .iter()
                    .position(|c| &c.name == name)
                    .ok_or_else(|| ConfigError::unknown_column("sort", name))?,
            ),
            None => None,
        };

        let layout = layout.unwrap_or(if columns.len() >= 12 {
            Layout::Auto
        } else {
            Layout::Fixed
        });

        let mut table = Self {
            columns,
            layout,
            table_width,
            rows,
            source,
            index: Vec::new(),
            sort: None,
            selection: Selection::new(),
            window: Window::new(),
            pending_changes: 0,
        };
        table.sync_index_with_pulled();

        match sort_column {
            Some(column) => {
                let direction = if reverse {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                table.apply_sort(column, direction);
            }
            None if reverse => {
                table.source.materialize();
                table.index = (0..table.source.pulled()).rev().collect();
                table.reset_window();
            }
            None => table.reset_window(),
        }

        if let Some(initial_value) = value {
            table.set_value(&initial_value);
        }

        // Construction is silent; notifications start with the first gesture.
        table.pending_changes = 0;
        Ok(table)
    }

    // =========================================================================
    // Renderer accessors
    // =========================================================================

    /// The resolved columns, in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The sizing strategy hint.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The overall width hint, if configured.
    pub fn table_width(&self) -> Option<u16> {
        self.table_width
    }

    /// The configured rows per screen.
    pub fn rows(&self) -> f64 {
        self.rows
    }

    /// The rendered window, in display order.
    pub fn visible_rows(&self) -> &[RowView] {
        &self.window.views
    }

    /// Number of rows rendered so far.
    pub fn rendered(&self) -> usize {
        self.window.views.len()
    }

    /// Total record count, when known. Streaming sources without a trusted
    /// length report `None` until exhausted.
    pub fn total(&self) -> Option<usize> {
        self.source.total()
    }

    /// Check if the source turned out to hold no records.
    pub fn is_empty(&self) -> bool {
        self.source.total() == Some(0)
    }

    /// The active sort on a column, for the header indicator.
    pub fn sort_indicator(&self, column: &str) -> Option<SortDirection> {
        let (idx, direction) = self.sort?;
        (self.columns[idx].name == column).then_some(direction)
    }

    /// Check if a row id is selected.
    pub fn is_selected(&self, row: usize) -> bool {
        self.selection.is_selected(row)
    }

    /// Check if any row is selected, for the header checkbox.
    pub fn any_selected(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    // =========================================================================
    // Value
    // =========================================================================

    /// The exposed value: selected records in display order, or every record
    /// when the selection is empty.
    ///
    /// Covers the whole collection, so a streaming source materializes.
    pub fn value(&mut self) -> TableValue {
        self.source.materialize();
        self.sync_index_with_pulled();
        let rows: Vec<usize> = if self.selection.is_empty() {
            self.index.clone()
        } else {
            self.selection.in_display_order(&self.index)
        };
        TableValue {
            records: rows.into_iter().map(|r| self.source.get(r).clone()).collect(),
            columns: self.columns.iter().map(|c| c.name.clone()).collect(),
        }
    }

    /// Selects exactly the rows equal to one of the given records.
    ///
    /// A record that equals several rows selects all of them; one that
    /// equals none selects nothing. The range anchor is left alone.
    pub fn set_value(&mut self, records: &[Record]) {
        self.source.materialize();
        self.sync_index_with_pulled();
        let mut target = HashSet::new();
        for (row, record) in self.source.records().iter().enumerate() {
            if records.iter().any(|wanted| wanted == record) {
                target.insert(row);
            }
        }
        let (added, removed) = self.selection.replace(target);
        trace!(
            "value set: {} selected, {} released",
            added.len(),
            removed.len()
        );
        self.push_change();
    }

    // =========================================================================
    // Change notifications
    // =========================================================================

    /// Drains the pending change-notification count.
    ///
    /// Every mutating gesture pushes exactly one notification; an embedder
    /// that drains a non-zero count re-reads the value and redraws.
    pub fn take_changes(&mut self) -> usize {
        std::mem::take(&mut self.pending_changes)
    }

    pub(crate) fn push_change(&mut self) {
        self.pending_changes += 1;
    }
}
