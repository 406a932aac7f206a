//! Grid rendering on a raw crossterm screen.
//!
//! One frame is: a bold header line with the select-all checkbox and the
//! sort indicators, a rule, a page of data rows out of the table's rendered
//! window, and a status line. Hit testing reuses the same column widths the
//! frame was drawn with.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{Clear, ClearType},
};
use gridlet::{Align, Layout, SortDirection, Table};
use unicode_width::UnicodeWidthStr;

/// Lines above the data region: header and rule.
pub const HEADER_ROWS: u16 = 2;
/// Width of the selection gutter.
pub const GUTTER: u16 = 2;

const MIN_WIDTH: u16 = 4;
const MAX_AUTO: u16 = 24;

/// Data rows that fit on screen, leaving room for the header and the status
/// line.
pub fn page_rows(height: u16) -> usize {
    height.saturating_sub(HEADER_ROWS + 1) as usize
}

/// Column widths for the current frame.
///
/// `Auto` sizes each column to its content, `Fixed` gives every column an
/// even share of the screen. Width hints from the configuration win in both
/// modes.
pub fn column_widths(table: &Table, width: u16) -> Vec<u16> {
    let columns = table.columns();
    if columns.is_empty() {
        return Vec::new();
    }
    let gaps = columns.len().saturating_sub(1) as u16;
    let available = width.saturating_sub(GUTTER + gaps).max(MIN_WIDTH);
    let fair = (available / columns.len() as u16).max(MIN_WIDTH);
    columns
        .iter()
        .enumerate()
        .map(|(position, column)| {
            let natural = match table.layout() {
                Layout::Fixed => fair,
                Layout::Auto => content_width(table, position).min(MAX_AUTO),
            };
            column.width.unwrap_or(natural).min(available)
        })
        .collect()
}

/// Column position under screen column `x`, if any.
pub fn column_at(x: u16, widths: &[u16]) -> Option<usize> {
    let mut edge = GUTTER;
    for (position, width) in widths.iter().enumerate() {
        if x < edge + width {
            return (x >= edge).then_some(position);
        }
        edge += width + 1;
    }
    None
}

/// Draws one frame.
pub fn draw(
    out: &mut impl Write,
    table: &Table,
    size: (u16, u16),
    viewport: usize,
) -> io::Result<()> {
    let (width, height) = size;
    let widths = column_widths(table, width);
    let page = page_rows(height);

    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(
        out,
        SetAttribute(Attribute::Bold),
        Print(header_line(table, &widths)),
        SetAttribute(Attribute::Reset)
    )?;
    queue!(out, MoveTo(0, 1), Print("─".repeat(width as usize)))?;

    if table.is_empty() {
        queue!(out, MoveTo(GUTTER, HEADER_ROWS), Print("No results."))?;
    } else {
        let views = table.visible_rows();
        for (line, view) in views.iter().skip(viewport).take(page).enumerate() {
            let selected = table.is_selected(view.row);
            queue!(out, MoveTo(0, HEADER_ROWS + line as u16))?;
            if selected {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(out, Print(data_line(table, selected, &view.cells, &widths)))?;
            if selected {
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
        }
    }

    if height > HEADER_ROWS {
        queue!(
            out,
            MoveTo(0, height - 1),
            SetAttribute(Attribute::Dim),
            Print(truncate_to_width(&status(table, viewport, page), width as usize)),
            SetAttribute(Attribute::Reset)
        )?;
    }
    out.flush()
}

fn header_line(table: &Table, widths: &[u16]) -> String {
    let mut line = String::from(if table.any_selected() { "■ " } else { "□ " });
    for (position, column) in table.columns().iter().enumerate() {
        if position > 0 {
            line.push(' ');
        }
        let text = match table.sort_indicator(&column.name) {
            Some(SortDirection::Ascending) => format!("{} ▲", column.name),
            Some(SortDirection::Descending) => format!("{} ▼", column.name),
            None => column.name.clone(),
        };
        line.push_str(&pad(&text, widths[position] as usize, column.align));
    }
    line
}

fn data_line(table: &Table, selected: bool, cells: &[String], widths: &[u16]) -> String {
    let mut line = String::from(if selected { "■ " } else { "□ " });
    for (position, cell) in cells.iter().enumerate() {
        if position > 0 {
            line.push(' ');
        }
        let align = table.columns()[position].align;
        line.push_str(&pad(cell, widths[position] as usize, align));
    }
    line
}

fn status(table: &Table, viewport: usize, page: usize) -> String {
    if table.is_empty() {
        return String::from("empty  |  q quits");
    }
    let rendered = table.rendered();
    let first = viewport + 1;
    let last = (viewport + page).min(rendered);
    let total = match table.total() {
        Some(total) => total.to_string(),
        None => String::from("?"),
    };
    format!(
        "{first}-{last} of {rendered} rendered, {total} total, {} selected  |  \
         click header sorts, a toggles all, q quits",
        table.selected_count()
    )
}

/// Widest rendered cell in the column, floored by the header text.
fn content_width(table: &Table, position: usize) -> u16 {
    let column = &table.columns()[position];
    // Room for the name plus a sort indicator.
    let mut width = (column.name.width() + 2).max(MIN_WIDTH as usize);
    for view in table.visible_rows() {
        width = width.max(view.cells[position].width());
    }
    width.min(u16::MAX as usize) as u16
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let text = truncate_to_width(text, width);
    let slack = width.saturating_sub(text.width());
    match align {
        Align::Left => format!("{text}{}", " ".repeat(slack)),
        Align::Right => format!("{}{text}", " ".repeat(slack)),
        Align::Center => {
            let left = slack / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(slack - left))
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_at_respects_gutter_and_gaps() {
        let widths = vec![10, 6];
        assert_eq!(column_at(0, &widths), None);
        assert_eq!(column_at(1, &widths), None);
        assert_eq!(column_at(2, &widths), Some(0));
        assert_eq!(column_at(11, &widths), Some(0));
        // The gap between columns hits nothing.
        assert_eq!(column_at(12, &widths), None);
        assert_eq!(column_at(13, &widths), Some(1));
        assert_eq!(column_at(18, &widths), Some(1));
        assert_eq!(column_at(19, &widths), None);
    }

    #[test]
    fn test_pad_aligns_by_display_width() {
        assert_eq!(pad("ab", 5, Align::Left), "ab   ");
        assert_eq!(pad("ab", 5, Align::Right), "   ab");
        assert_eq!(pad("ab", 5, Align::Center), " ab  ");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("hello", 5), "hello");
        assert_eq!(truncate_to_width("hello", 4), "hel…");
        assert_eq!(truncate_to_width("hello", 0), "");
    }
}
