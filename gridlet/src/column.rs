//! Column model and resolution

use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::ConfigError;
use crate::format::CellFormat;
use crate::model::Record;
use crate::model::Value;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Resolved column configuration.
///
/// Columns define the structure of the grid: header text, alignment, width
/// hint, whether header clicks resort, and how cells render to strings. The
/// set is resolved once at table construction and never changes afterwards.
///
/// # Examples
///
/// ```
/// use gridlet::column::{Align, Column};
///
/// let columns = vec![
///     Column::new("name"),
///     Column::new("score").align(Align::Right).width(12),
///     Column::new("icon").unsortable(),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name; doubles as the header text and the record field key
    pub name: String,
    /// Horizontal alignment
    pub align: Align,
    /// Width hint in terminal columns, if fixed
    pub width: Option<u16>,
    /// Whether header interactions resort by this column
    pub sortable: bool,
    /// Cell renderer
    pub format: CellFormat,
}

impl Column {
    /// Create a new left-aligned, sortable text column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            align: Align::Left,
            width: None,
            sortable: true,
            format: CellFormat::Text,
        }
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set a fixed width hint.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Make the column ignore header interactions.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Set the cell format.
    pub fn format(mut self, format: CellFormat) -> Self {
        self.format = format;
        self
    }
}

/// Per-column config overrides, keyed by column name.
pub(crate) struct Overrides<'a> {
    pub format: &'a HashMap<String, CellFormat>,
    pub align: &'a HashMap<String, Align>,
    pub width: &'a HashMap<String, u16>,
}

/// Resolves the column set from an explicit list or from the data prefix,
/// applies type inference, then config overrides.
///
/// Inference looks at the first defined value found per column within the
/// prefix: numeric values make a right-aligned number column, datetimes a
/// date column, anything else text. Overrides naming a column outside the
/// resolved list are configuration errors.
pub(crate) fn resolve(
    explicit: Option<&[String]>,
    prefix: &[Record],
    overrides: Overrides<'_>,
) -> Result<Vec<Column>, ConfigError> {
    let names = match explicit {
        Some(names) => {
            let mut seen = HashSet::new();
            for name in names {
                if !seen.insert(name.as_str()) {
                    return Err(ConfigError::duplicate_column(name));
                }
            }
            names.to_vec()
        }
        None => derive_names(prefix),
    };

    for key in overrides.format.keys() {
        ensure_known(&names, key, "format")?;
    }
    for key in overrides.align.keys() {
        ensure_known(&names, key, "align")?;
    }
    for key in overrides.width.keys() {
        ensure_known(&names, key, "width")?;
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let (format, align) = infer(prefix, &name);
            let mut column = Column::new(&name).format(format).align(align);
            if let Some(format) = overrides.format.get(&name) {
                column.format = format.clone();
            }
            if let Some(align) = overrides.align.get(&name) {
                column.align = *align;
            }
            if let Some(width) = overrides.width.get(&name) {
                column.width = Some(*width);
            }
            column
        })
        .collect();
    Ok(columns)
}

/// Union of field names over the prefix, first occurrence wins.
fn derive_names(prefix: &[Record]) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    for record in prefix {
        for name in record.field_names() {
            if seen.insert(name.to_string()) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Format and alignment from the first defined value in the prefix.
fn infer(prefix: &[Record], name: &str) -> (CellFormat, Align) {
    for record in prefix {
        match record.get(name) {
            Some(value) if value.is_defined() => {
                return if value.is_numeric() {
                    (CellFormat::Number, Align::Right)
                } else if matches!(value, Value::DateTime(_)) {
                    (CellFormat::Date, Align::Left)
                } else {
                    (CellFormat::Text, Align::Left)
                };
            }
            _ => {}
        }
    }
    (CellFormat::Text, Align::Left)
}

fn ensure_known(names: &[String], key: &str, context: &'static str) -> Result<(), ConfigError> {
    if names.iter().any(|n| n == key) {
        Ok(())
    } else {
        Err(ConfigError::unknown_column(context, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides<'a>(
        format: &'a HashMap<String, CellFormat>,
        align: &'a HashMap<String, Align>,
        width: &'a HashMap<String, u16>,
    ) -> Overrides<'a> {
        Overrides {
            format,
            align,
            width,
        }
    }

    #[test]
    fn test_derive_first_occurrence_across_records() {
        let prefix = vec![
            Record::new().set("b", 1i64),
            Record::new().set("a", 2i64).set("b", 3i64),
            Record::new().set("c", "x"),
        ];
        assert_eq!(derive_names(&prefix), ["b", "a", "c"]);
    }

    #[test]
    fn test_infer_skips_undefined() {
        let prefix = vec![
            Record::new().set("v", Value::Null),
            Record::new().set("v", f64::NAN),
            Record::new().set("v", 2.5),
        ];
        let (format, align) = infer(&prefix, "v");
        assert!(matches!(format, CellFormat::Number));
        assert_eq!(align, Align::Right);
    }

    #[test]
    fn test_duplicate_explicit_column() {
        let explicit = vec!["a".to_string(), "a".to_string()];
        let (f, a, w) = (HashMap::new(), HashMap::new(), HashMap::new());
        let err = resolve(Some(&explicit), &[], overrides(&f, &a, &w)).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_unknown_override_column() {
        let explicit = vec!["a".to_string()];
        let f = HashMap::new();
        let mut a = HashMap::new();
        a.insert("ghost".to_string(), Align::Right);
        let w = HashMap::new();
        let err = resolve(Some(&explicit), &[], overrides(&f, &a, &w)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownColumn { .. }));
    }
}
