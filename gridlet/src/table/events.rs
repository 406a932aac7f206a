//! Interaction entry points.
//!
//! Each gesture that can change the exposed value ends with exactly one
//! change notification, however many rows it touched. Window growth is not
//! a value change and never notifies.

use log::trace;

use super::Table;
use super::sort::SortDirection;
use crate::event::EventResult;
use crate::event::Modifiers;

impl Table {
    /// Header interaction for a column.
    ///
    /// Plain interactions cycle ascending, descending, cleared. A
    /// ctrl-qualified interaction on the currently-sorted column clears from
    /// either direction; an alt-qualified interaction starts a new sort
    /// descending. Unknown and unsortable columns ignore the event.
    pub fn click_header(&mut self, column: &str, modifiers: Modifiers) -> EventResult {
        let Some(idx) = self.columns.iter().position(|c| c.name == column) else {
            return EventResult::Ignored;
        };
        if !self.columns[idx].sortable {
            return EventResult::Ignored;
        }
        match self.sort {
            Some((current, direction)) if current == idx => {
                if modifiers.ctrl {
                    self.clear_sort();
                } else {
                    match direction {
                        SortDirection::Ascending => self.apply_sort(idx, SortDirection::Descending),
                        SortDirection::Descending => self.clear_sort(),
                    }
                }
            }
            _ => {
                let direction = if modifiers.alt {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                self.apply_sort(idx, direction);
            }
        }
        EventResult::Consumed
    }

    /// Row interaction by row id.
    ///
    /// A shift-qualified interaction extends the range from the anchor;
    /// anything else toggles the row's membership, checkbox style.
    pub fn click_row(&mut self, row: usize, modifiers: Modifiers) -> EventResult {
        debug_assert!(
            row < self.source.pulled(),
            "row id {row} outside the pulled prefix"
        );
        if row >= self.source.pulled() {
            return EventResult::Ignored;
        }
        if modifiers.shift {
            let (added, removed) = self.selection.extend_to(row, &self.index);
            trace!(
                "range to row {row}: {} selected, {} released",
                added.len(),
                removed.len()
            );
        } else {
            let now_selected = self.selection.toggle(row);
            trace!("toggled row {row}: selected={now_selected}");
        }
        self.push_change();
        EventResult::Consumed
    }

    /// Header checkbox: clears a non-empty selection, otherwise selects
    /// every row. Selecting all materializes the source. The range anchor
    /// does not survive either way.
    pub fn toggle_all(&mut self) -> EventResult {
        self.selection.reset_range();
        if self.selection.is_empty() {
            self.source.materialize();
            self.sync_index_with_pulled();
            let added = self.selection.select_all(&self.index);
            trace!("selected all: {} rows", added.len());
        } else {
            let removed = self.selection.clear();
            trace!("cleared selection: {} rows", removed.len());
        }
        self.push_change();
        EventResult::Consumed
    }

    /// Scroll intent from the renderer: grow the window by one row step.
    pub fn scroll_hint(&mut self) -> EventResult {
        if self.advance_window() > 0 {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
