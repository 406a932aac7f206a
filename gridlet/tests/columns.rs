//! Tests for column resolution, inference, and layout selection.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use chrono::TimeZone;
use chrono::Utc;
use gridlet::{
    Align, CellFormat, ConfigError, Layout, Modifiers, Record, RecordSource, Table, TableConfig,
};

fn column_names(table: &Table) -> Vec<&str> {
    table.columns().iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn test_columns_derive_in_first_occurrence_order() {
    let records = vec![
        Record::new().set("beta", 1i64),
        Record::new().set("alpha", 2i64).set("beta", 3i64),
        Record::new().set("gamma", "x"),
    ];
    let t = Table::new(RecordSource::from_records(records), TableConfig::default()).unwrap();
    assert_eq!(column_names(&t), ["beta", "alpha", "gamma"]);
}

#[test]
fn test_explicit_columns_project_and_order() {
    let records = vec![
        Record::new()
            .set("a", 1i64)
            .set("b", "one")
            .set("c", true),
    ];
    let t = Table::new(
        RecordSource::from_records(records),
        TableConfig::default().columns(["b", "a"]),
    )
    .unwrap();
    assert_eq!(column_names(&t), ["b", "a"]);
    assert_eq!(t.visible_rows()[0].cells, ["one", "1"]);
}

#[test]
fn test_explicit_column_missing_from_data_renders_empty() {
    let records = vec![Record::new().set("a", 7i64)];
    let t = Table::new(
        RecordSource::from_records(records),
        TableConfig::default().columns(["a", "ghost"]),
    )
    .unwrap();
    assert_eq!(t.visible_rows()[0].cells, ["7", ""]);
}

#[test]
fn test_numeric_columns_align_right_and_group() {
    let records = vec![Record::new().set("n", 1234567i64).set("s", "x")];
    let t = Table::new(RecordSource::from_records(records), TableConfig::default()).unwrap();
    assert_eq!(t.columns()[0].align, Align::Right);
    assert_eq!(t.columns()[1].align, Align::Left);
    assert_eq!(t.visible_rows()[0].cells, ["1,234,567", "x"]);
}

#[test]
fn test_datetime_columns_render_iso_dates() {
    let when = Utc.with_ymd_and_hms(2001, 2, 3, 0, 0, 0).unwrap();
    let records = vec![Record::new().set("when", when)];
    let t = Table::new(RecordSource::from_records(records), TableConfig::default()).unwrap();
    assert_eq!(t.visible_rows()[0].cells, ["2001-02-03"]);
}

#[test]
fn test_inference_skips_undefined_leading_values() {
    let records = vec![
        Record::new().set("v", gridlet::Value::Null),
        Record::new().set("v", f64::NAN),
        Record::new().set("v", 2.5f64),
    ];
    let t = Table::new(RecordSource::from_records(records), TableConfig::default()).unwrap();
    assert_eq!(t.columns()[0].align, Align::Right);
}

#[test]
fn test_config_overrides_beat_inference() {
    let records = vec![Record::new().set("n", 1234i64)];
    let t = Table::new(
        RecordSource::from_records(records),
        TableConfig::default()
            .align("n", Align::Center)
            .width("n", 9)
            .format("n", CellFormat::custom(|v, _| format!("#{v:?}"))),
    )
    .unwrap();
    assert_eq!(t.columns()[0].align, Align::Center);
    assert_eq!(t.columns()[0].width, Some(9));
    assert_eq!(t.visible_rows()[0].cells, ["#Int(1234)"]);
}

#[test]
fn test_unknown_override_column_rejected() {
    let records = vec![Record::new().set("a", 1i64)];
    let err = Table::new(
        RecordSource::from_records(records),
        TableConfig::default().format("ghost", CellFormat::Text),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownColumn { .. }));
    let message = err.to_string();
    assert!(message.contains("ghost"), "{message}");
    assert!(message.contains("format"), "{message}");
}

#[test]
fn test_duplicate_explicit_columns_rejected() {
    let err = Table::new(
        RecordSource::from_records(vec![Record::new().set("a", 1i64)]),
        TableConfig::default().columns(["a", "a"]),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateColumn { .. }));
}

#[test]
fn test_layout_defaults_by_column_count() {
    let mut wide = Record::new();
    for i in 0..12 {
        wide = wide.set(format!("c{i}"), i as i64);
    }
    let t = Table::new(
        RecordSource::from_records(vec![wide.clone()]),
        TableConfig::default(),
    )
    .unwrap();
    assert_eq!(t.layout(), Layout::Auto);

    let narrow = Record::new().set("a", 1i64).set("b", 2i64).set("c", 3i64);
    let t = Table::new(
        RecordSource::from_records(vec![narrow]),
        TableConfig::default(),
    )
    .unwrap();
    assert_eq!(t.layout(), Layout::Fixed);

    let t = Table::new(
        RecordSource::from_records(vec![wide]),
        TableConfig::default().layout(Layout::Fixed),
    )
    .unwrap();
    assert_eq!(t.layout(), Layout::Fixed);
}

#[test]
fn test_streaming_derivation_sees_only_the_initial_window() {
    let records: Vec<Record> = (0..30)
        .map(|i| {
            let record = Record::new().set("n", i as i64);
            if i >= 20 {
                record.set("late", "surprise")
            } else {
                record
            }
        })
        .collect();
    let mut t = Table::new(
        RecordSource::streaming(records),
        TableConfig::default().rows(5.0),
    )
    .unwrap();
    assert_eq!(column_names(&t), ["n"]);
    // Columns are fixed at construction; materializing later changes nothing.
    t.click_header("n", Modifiers::NONE);
    assert_eq!(column_names(&t), ["n"]);
}

#[test]
fn test_custom_format_never_sees_undefined_cells() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let records = vec![
        Record::new().set("v", 1i64),
        Record::new().set("v", gridlet::Value::Null),
        Record::new().set("v", f64::NAN),
    ];
    let t = Table::new(
        RecordSource::from_records(records),
        TableConfig::default().format(
            "v",
            CellFormat::custom(move |_, _| {
                counter.fetch_add(1, Ordering::Relaxed);
                "seen".to_string()
            }),
        ),
    )
    .unwrap();
    assert_eq!(t.visible_rows()[0].cells, ["seen"]);
    assert_eq!(t.visible_rows()[1].cells, [""]);
    assert_eq!(t.visible_rows()[2].cells, [""]);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn test_dimension_accessors() {
    let t = Table::new(
        RecordSource::from_records(vec![Record::new().set("a", 1i64)]),
        TableConfig::default().rows(7.5).table_width(120),
    )
    .unwrap();
    assert_eq!(t.rows(), 7.5);
    assert_eq!(t.table_width(), Some(120));
}
