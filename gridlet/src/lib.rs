//! Interactive tabular-data widget engine
//!
//! The data-windowing, sorting, and multi-selection core behind a scrollable
//! grid: lazy record sources, a display-index permutation, incremental
//! window growth, column sorting that sinks missing values, and checkbox or
//! shift-range selection. Rendering is a collaborator, not a concern: the
//! engine hands out formatted rows and header state, and takes interactions
//! back through a handful of entry points.
//!
//! ```
//! use gridlet::event::Modifiers;
//! use gridlet::model::Record;
//! use gridlet::source::RecordSource;
//! use gridlet::table::{Table, TableConfig};
//!
//! let source = RecordSource::from_records(vec![
//!     Record::new().set("name", "Ada").set("score", 9i64),
//!     Record::new().set("name", "Grace").set("score", 11i64),
//! ]);
//! let mut table = Table::new(source, TableConfig::default()).unwrap();
//!
//! table.click_row(1, Modifiers::NONE);
//! assert_eq!(table.take_changes(), 1);
//! assert_eq!(table.value().records[0].get_str("name").unwrap(), Some("Grace"));
//! ```

pub mod column;
pub mod error;
pub mod event;
pub mod format;
pub mod model;
pub mod range;
pub mod selection;
pub mod source;
pub mod table;

pub use column::Align;
pub use column::Column;
pub use error::ConfigError;
pub use error::FieldError;
pub use event::EventResult;
pub use event::Modifiers;
pub use format::CellFormat;
pub use model::Record;
pub use model::Value;
pub use range::Range;
pub use range::RangeConfig;
pub use source::RecordSource;
pub use table::Layout;
pub use table::RowView;
pub use table::SortDirection;
pub use table::Table;
pub use table::TableConfig;
pub use table::TableValue;
