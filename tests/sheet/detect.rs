//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd Team.

use ye::{YeBoundingBox, YeOrientation, YeStructureDetector};

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn transpose(grid: &[Vec<String>]) -> Vec<Vec<String>> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|c| grid.iter().map(|row| row.get(c).cloned().unwrap_or_default()).collect())
        .collect()
}

#[test]
fn test_bounding_box_skips_blank_margins() {
    let detector = YeStructureDetector::new();
    let cells = grid(&[
        &["", "", ""],
        &["", "Name", "Age"],
        &["", "Ann", " "],
        &["", "", ""],
    ]);
    assert_eq!(
        detector.bounding_box(&cells),
        YeBoundingBox { first_row: 1, first_col: 1, end_row: 3, end_col: 3 }
    );
}

#[test]
fn test_all_blank_grid_is_empty() {
    let detector = YeStructureDetector::new();
    let cells = grid(&[&["", " "], &["\t", ""]]);
    assert!(detector.bounding_box(&cells).is_empty());

    let worksheet = detector.detect("Blank", &cells);
    assert!(worksheet.labels.is_empty());
    assert!(worksheet.rows.is_empty());
}

#[test]
fn test_labels_in_first_row_detected_as_columns() {
    let detector = YeStructureDetector::new();
    let cells = grid(&[&["Age", "Score"], &["31", "88"], &["27", "92"]]);
    assert_eq!(detector.detect_orientation(&cells), YeOrientation::Columns);
}

#[test]
fn test_transposed_grid_detected_as_rows() {
    let detector = YeStructureDetector::new();
    let cells = grid(&[&["Age", "Score"], &["31", "88"], &["27", "92"]]);
    let transposed = transpose(&cells);

    assert_eq!(detector.detect_orientation(&transposed), YeOrientation::Rows);
    let scores = detector.orientation_scores(&transposed);
    assert!(scores.rows > scores.columns);
}

#[test]
fn test_ties_default_to_columns() {
    let detector = YeStructureDetector::new();
    let cells = grid(&[
        &["Name", "Age", "Score"],
        &["Ann", "31", "88"],
        &["Bo", "27", "92"],
        &["Cy", "45", "75"],
    ]);
    let scores = detector.orientation_scores(&cells);
    assert!(scores.columns >= scores.rows);
    assert_eq!(detector.detect_orientation(&cells), YeOrientation::Columns);
}

#[test]
fn test_single_row_and_single_column_are_forced() {
    let detector = YeStructureDetector::new();
    assert_eq!(
        detector.detect_orientation(&grid(&[&["1", "2", "3"]])),
        YeOrientation::Columns
    );
    assert_eq!(
        detector.detect_orientation(&grid(&[&["Name"], &["Ann"], &["Bo"]])),
        YeOrientation::Rows
    );
}

#[test]
fn test_normalize_columns_pads_missing_cells() {
    let detector = YeStructureDetector::new();
    let cells = vec![
        vec!["Name".to_string(), "Age".to_string()],
        vec!["Ann".to_string()],
        vec!["Bo".to_string(), "27".to_string()],
    ];
    let worksheet = detector.normalize("People", &cells, YeOrientation::Columns);

    assert_eq!(worksheet.labels, vec!["Name", "Age"]);
    assert_eq!(worksheet.rows["Age"], vec!["".to_string(), "27".to_string()]);
    assert_eq!(worksheet.row_count(), 2);
}

#[test]
fn test_normalize_rows_reads_first_column_as_labels() {
    let detector = YeStructureDetector::new();
    let cells = grid(&[&["Age", "31", "27"], &["Score", "88", "92"]]);
    let worksheet = detector.detect("Stats", &cells);

    assert_eq!(worksheet.orientation, YeOrientation::Rows);
    assert_eq!(worksheet.labels, vec!["Age", "Score"]);
    assert_eq!(worksheet.rows["Score"], vec!["88".to_string(), "92".to_string()]);
}

#[test]
fn test_blank_labels_are_dropped() {
    let detector = YeStructureDetector::new();
    let cells = grid(&[&["Name", "", "Age"], &["Ann", "x", "3"]]);
    let worksheet = detector.normalize("S", &cells, YeOrientation::Columns);
    assert_eq!(worksheet.labels, vec!["Name", "Age"]);
    assert_eq!(worksheet.values("age").map(|v| v.to_vec()), Some(vec!["3".to_string()]));
}
