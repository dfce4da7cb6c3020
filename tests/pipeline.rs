use std::fs;
use std::path::PathBuf;

use stampscope::constants::{FEATURE_COLUMNS, TIMESTAMP_COLUMN};
use stampscope::features::extract_parts;
use stampscope::loader::{load_from_file, load_synthetic, LoadOptions};
use stampscope::normalize::convert_to_datetime;
use stampscope::report::{write_table, OutputFormat};
use stampscope::{derive_features, ColumnData, PipelineError, Table};

fn temp_csv(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stampscope_test_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn integers(table: &Table, name: &str) -> Vec<i64> {
    match &table.column(name).unwrap().data {
        ColumnData::Integer(values) => values.clone(),
        other => panic!("expected integer column, got {}", other.type_name()),
    }
}

#[test]
fn test_synthetic_end_to_end() {
    let raw = load_synthetic("2025-09-16 02:35:00", 15, "14 hours").unwrap();
    let canonical = convert_to_datetime(&raw).unwrap();
    assert_eq!(
        canonical.column(TIMESTAMP_COLUMN).unwrap().data.display_at(1).as_deref(),
        Some("2025-09-16 16:35:00")
    );

    let features = extract_parts(&canonical).unwrap();
    assert_eq!(features.height(), 15);
    assert_eq!(features.column_names(), FEATURE_COLUMNS.to_vec());

    assert_eq!(integers(&features, "day")[..2], [16, 16]);
    assert_eq!(integers(&features, "month")[..2], [9, 9]);
    assert_eq!(integers(&features, "year")[..2], [2025, 2025]);
    assert_eq!(integers(&features, "hour")[..2], [2, 16]);
    assert_eq!(integers(&features, "weekday")[..2], [1, 1]);
    assert_eq!(integers(&features, "quarter")[..2], [3, 3]);
}

#[test]
fn test_synthetic_table_output() {
    let raw = load_synthetic("2025-09-16 02:35:00", 15, "14 hours").unwrap();
    let features = derive_features(&raw).unwrap();

    let mut out = Vec::new();
    write_table(&mut out, &features, OutputFormat::Table).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0], "    day  month  year  hour  weekday  quarter");
    assert_eq!(lines[1], "0    16      9  2025     2        1        3");
    assert_eq!(lines[2], "1    16      9  2025    16        1        3");
    // 2025-09-24 06:35 is the last of the fifteen timestamps
    assert_eq!(lines[15], "14   24      9  2025     6        2        3");
}

#[test]
fn test_feature_ranges_hold() {
    let raw = load_synthetic("2023-12-30 21:00:00", 500, "7h").unwrap();
    let features = derive_features(&raw).unwrap();
    assert_eq!(features.height(), 500);

    let months = integers(&features, "month");
    let quarters = integers(&features, "quarter");
    for (month, quarter) in months.iter().zip(&quarters) {
        assert!((1..=12).contains(month));
        assert_eq!(*quarter, (month - 1) / 3 + 1);
    }
    assert!(integers(&features, "weekday").iter().all(|w| (0..=6).contains(w)));
    assert!(integers(&features, "hour").iter().all(|h| (0..=23).contains(h)));
    assert!(integers(&features, "day").iter().all(|d| (1..=31).contains(d)));
}

#[test]
fn test_file_end_to_end() {
    let path = temp_csv(
        "valid.csv",
        "created_at\n2025-09-16 02:35:00\n2025-12-31T23:59:59\n2024-02-29\n",
    );
    let raw = load_from_file(&path, &LoadOptions::default()).unwrap();
    assert_eq!(raw.column_names(), vec![TIMESTAMP_COLUMN]);
    assert_eq!(raw.height(), 3);

    let features = derive_features(&raw).unwrap();
    assert_eq!(integers(&features, "quarter"), vec![3, 4, 1]);
    assert_eq!(integers(&features, "hour"), vec![2, 23, 0]);
    // Tuesday, Wednesday, Thursday
    assert_eq!(integers(&features, "weekday"), vec![1, 2, 3]);
}

#[test]
fn test_file_without_header() {
    let path = temp_csv("no_header.csv", "2025-09-16 02:35:00\n2025-09-17 02:35:00\n");
    let options = LoadOptions {
        delimiter: b',',
        has_headers: false,
    };
    let raw = load_from_file(&path, &options).unwrap();
    assert_eq!(raw.height(), 2);
}

#[test]
fn test_file_two_columns_is_shape_error() {
    let path = temp_csv("two_columns.csv", "a,b\n2025-09-16,1\n");
    assert!(matches!(
        load_from_file(&path, &LoadOptions::default()),
        Err(PipelineError::Shape(2))
    ));
}

#[test]
fn test_missing_file_is_not_found() {
    let path = std::env::temp_dir().join("stampscope_definitely_missing.csv");
    assert!(matches!(
        load_from_file(&path, &LoadOptions::default()),
        Err(PipelineError::NotFound(p)) if p == path
    ));
}

#[test]
fn test_ragged_file_is_parse_error() {
    let path = temp_csv("ragged.csv", "timestamp\n2025-09-16\n2025-09-17,extra\n");
    assert!(matches!(
        load_from_file(&path, &LoadOptions::default()),
        Err(PipelineError::Parse(_))
    ));
}

#[test]
fn test_empty_file_is_parse_error() {
    let path = temp_csv("empty.csv", "");
    assert!(matches!(
        load_from_file(&path, &LoadOptions::default()),
        Err(PipelineError::Parse(_))
    ));
}

#[test]
fn test_unparseable_value_fails_whole_file() {
    let path = temp_csv("bad_value.csv", "timestamp\n2025-09-16 02:35:00\nnot-a-date\n");
    let raw = load_from_file(&path, &LoadOptions::default()).unwrap();
    assert!(matches!(convert_to_datetime(&raw), Err(PipelineError::Parse(_))));
}

#[test]
fn test_extract_before_convert_is_type_error() {
    let path = temp_csv("unconverted.csv", "timestamp\n2025-09-16 02:35:00\n");
    let raw = load_from_file(&path, &LoadOptions::default()).unwrap();
    assert!(matches!(extract_parts(&raw), Err(PipelineError::Type { .. })));
}
