//! Tests for the sort cycle and index rebuilds.

use gridlet::{Modifiers, Record, RecordSource, SortDirection, Table, TableConfig, Value};

/// Five records with gaps: v = 3, 1, null, 2, 1.
fn sample() -> Vec<Record> {
    vec![
        Record::new().set("name", "r0").set("v", 3i64),
        Record::new().set("name", "r1").set("v", 1i64),
        Record::new().set("name", "r2").set("v", Value::Null),
        Record::new().set("name", "r3").set("v", 2i64),
        Record::new().set("name", "r4").set("v", 1i64),
    ]
}

fn table(config: TableConfig) -> Table {
    Table::new(RecordSource::from_records(sample()), config).unwrap()
}

fn visible_ids(table: &Table) -> Vec<usize> {
    table.visible_rows().iter().map(|r| r.row).collect()
}

#[test]
fn test_header_cycle_ascending_descending_clear() {
    let mut t = table(TableConfig::default());
    assert_eq!(visible_ids(&t), [0, 1, 2, 3, 4]);

    t.click_header("v", Modifiers::NONE);
    assert_eq!(t.sort_indicator("v"), Some(SortDirection::Ascending));
    assert_eq!(visible_ids(&t), [1, 4, 3, 0, 2]);
    assert_eq!(t.take_changes(), 1);

    t.click_header("v", Modifiers::NONE);
    assert_eq!(t.sort_indicator("v"), Some(SortDirection::Descending));
    assert_eq!(visible_ids(&t), [0, 3, 1, 4, 2]);
    assert_eq!(t.take_changes(), 1);

    t.click_header("v", Modifiers::NONE);
    assert_eq!(t.sort_indicator("v"), None);
    assert_eq!(visible_ids(&t), [0, 1, 2, 3, 4]);
    assert_eq!(t.take_changes(), 1);

    // The cycle starts over.
    t.click_header("v", Modifiers::NONE);
    assert_eq!(t.sort_indicator("v"), Some(SortDirection::Ascending));
}

#[test]
fn test_missing_values_sink_in_both_directions() {
    let mut t = table(TableConfig::default());
    t.click_header("v", Modifiers::NONE);
    assert_eq!(visible_ids(&t).last(), Some(&2));
    t.click_header("v", Modifiers::NONE);
    assert_eq!(visible_ids(&t).last(), Some(&2));
}

#[test]
fn test_ties_keep_enumeration_order_on_first_sort() {
    let mut t = table(TableConfig::default());
    t.click_header("v", Modifiers::NONE);
    let ids = visible_ids(&t);
    let pos1 = ids.iter().position(|&r| r == 1).unwrap();
    let pos4 = ids.iter().position(|&r| r == 4).unwrap();
    assert!(pos1 < pos4, "equal values keep enumeration order");
}

#[test]
fn test_ctrl_click_clears_from_ascending() {
    let mut t = table(TableConfig::default());
    t.click_header("v", Modifiers::NONE);
    t.click_header("v", Modifiers::CTRL);
    assert_eq!(t.sort_indicator("v"), None);
    assert_eq!(visible_ids(&t), [0, 1, 2, 3, 4]);
}

#[test]
fn test_alt_click_starts_descending() {
    let mut t = table(TableConfig::default());
    t.click_header("v", Modifiers::ALT);
    assert_eq!(t.sort_indicator("v"), Some(SortDirection::Descending));
    assert_eq!(visible_ids(&t), [0, 3, 1, 4, 2]);
}

#[test]
fn test_switching_columns_restarts_ascending() {
    let mut t = table(TableConfig::default());
    t.click_header("v", Modifiers::NONE);
    t.click_header("v", Modifiers::NONE);
    assert_eq!(t.sort_indicator("v"), Some(SortDirection::Descending));
    t.click_header("name", Modifiers::NONE);
    assert_eq!(t.sort_indicator("v"), None);
    assert_eq!(t.sort_indicator("name"), Some(SortDirection::Ascending));
    assert_eq!(visible_ids(&t), [0, 1, 2, 3, 4]);
}

#[test]
fn test_initial_sort_config() {
    let t = table(TableConfig::default().sort("v"));
    assert_eq!(visible_ids(&t), [1, 4, 3, 0, 2]);
}

#[test]
fn test_initial_sort_reverse_starts_descending() {
    let mut t = table(TableConfig::default().sort("v").reverse());
    assert_eq!(t.sort_indicator("v"), Some(SortDirection::Descending));
    assert_eq!(visible_ids(&t), [0, 3, 1, 4, 2]);
    // Construction itself is silent.
    assert_eq!(t.take_changes(), 0);
}

#[test]
fn test_reverse_without_sort_reverses_enumeration() {
    let t = table(TableConfig::default().reverse());
    assert_eq!(visible_ids(&t), [4, 3, 2, 1, 0]);
    assert_eq!(t.sort_indicator("v"), None);
}

#[test]
fn test_unknown_sort_column_rejected() {
    let err = Table::new(
        RecordSource::from_records(sample()),
        TableConfig::default().sort("ghost"),
    )
    .unwrap_err();
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn test_unknown_header_ignored() {
    let mut t = table(TableConfig::default());
    let result = t.click_header("ghost", Modifiers::NONE);
    assert!(!result.is_handled());
    assert_eq!(t.take_changes(), 0);
}

#[test]
fn test_string_column_sorts_lexicographically() {
    let mut t = table(TableConfig::default());
    t.click_header("name", Modifiers::NONE);
    assert_eq!(visible_ids(&t), [0, 1, 2, 3, 4]);
    t.click_header("name", Modifiers::NONE);
    assert_eq!(visible_ids(&t), [4, 3, 2, 1, 0]);
}

#[test]
fn test_clear_restores_enumeration_after_column_hopping() {
    let mut t = table(TableConfig::default());
    t.click_header("v", Modifiers::NONE);
    t.click_header("name", Modifiers::NONE);
    t.click_header("name", Modifiers::NONE);
    t.click_header("name", Modifiers::NONE);
    assert_eq!(visible_ids(&t), [0, 1, 2, 3, 4]);
}

#[test]
fn test_resort_resets_window_to_initial_size() {
    let records: Vec<Record> = (0..50)
        .map(|i| Record::new().set("i", i as i64))
        .collect();
    let mut t = Table::new(
        RecordSource::from_records(records),
        TableConfig::default().rows(4.0),
    )
    .unwrap();
    assert_eq!(t.rendered(), 8);
    t.scroll_hint();
    t.scroll_hint();
    assert_eq!(t.rendered(), 16);
    t.click_header("i", Modifiers::NONE);
    assert_eq!(t.rendered(), 8);
}

#[test]
fn test_selection_survives_resort_and_reads_in_display_order() {
    let mut t = table(TableConfig::default());
    t.click_row(0, Modifiers::NONE);
    t.click_row(3, Modifiers::NONE);
    t.click_header("v", Modifiers::NONE);
    assert!(t.is_selected(0));
    assert!(t.is_selected(3));
    // Ascending order puts row 3 (v=2) before row 0 (v=3).
    let value = t.value();
    assert_eq!(value.records.len(), 2);
    assert_eq!(value.records[0].get_str("name").unwrap(), Some("r3"));
    assert_eq!(value.records[1].get_str("name").unwrap(), Some("r0"));
}

#[test]
fn test_float_and_int_sort_together() {
    let records = vec![
        Record::new().set("x", 2.5),
        Record::new().set("x", 2i64),
        Record::new().set("x", f64::NAN),
        Record::new().set("x", 3i64),
    ];
    let mut t = Table::new(RecordSource::from_records(records), TableConfig::default()).unwrap();
    t.click_header("x", Modifiers::NONE);
    assert_eq!(visible_ids(&t), [1, 0, 3, 2]);
}

#[test]
fn test_datetime_column_sorts_chronologically() {
    use chrono::TimeZone;
    let when = |y: i32| chrono::Utc.with_ymd_and_hms(y, 6, 1, 0, 0, 0).unwrap();
    let records = vec![
        Record::new().set("at", when(2021)),
        Record::new().set("at", when(1999)),
        Record::new().set("at", when(2010)),
    ];
    let mut t = Table::new(RecordSource::from_records(records), TableConfig::default()).unwrap();
    t.click_header("at", Modifiers::NONE);
    assert_eq!(visible_ids(&t), [1, 2, 0]);
}
