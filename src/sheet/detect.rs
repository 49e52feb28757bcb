//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Structure Detection
//!
//! Raw sheet grids do not say whether their labels run across the top row or
//! down the first column. The detector crops a grid to its populated area,
//! scores both readings and normalizes the grid into a [`YeWorksheet`].
//!
//! ## Scoring
//!
//! Each orientation receives two partial scores that are summed:
//!
//! - **Label likeness** of the candidate label row/column:
//!   `2·unique + 3·textual + 1·short + 1·fill + 2·programmatic − 2·proper_name`
//! - **Data consistency** of the remaining cells read as series under that
//!   orientation: `3 · mean(max(numeric_ratio, text_ratio))`
//!
//! `Rows` wins only with a strictly greater total, so ties read as `Columns`.
//! The weights are part of the observable behavior; changing them changes
//! which grids flip orientation.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::sheet::worksheet::{YeOrientation, YeWorksheet};

const UNIQUE_WEIGHT: f64 = 2.0;
const TEXTUAL_WEIGHT: f64 = 3.0;
const SHORT_WEIGHT: f64 = 1.0;
const FILL_WEIGHT: f64 = 1.0;
const PROGRAMMATIC_WEIGHT: f64 = 2.0;
const PROPER_NAME_PENALTY: f64 = 2.0;
const CONSISTENCY_WEIGHT: f64 = 3.0;
const SHORT_LABEL_CHARS: usize = 30;

fn snake_case_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9]*(?:_[a-z0-9]+)+$").unwrap())
}

fn camel_case_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z]+(?:[A-Z][a-z0-9]*)+$").unwrap())
}

fn proper_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+$").unwrap())
}

/// Whether a cell reads as a number (`1,200`, `$4.50`, `35%`, `-2e3`).
pub fn is_numeric_cell(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }
    let unsigned = trimmed.strip_prefix(&['$', '€', '£'][..]).unwrap_or(trimmed);
    let unsigned = unsigned.strip_suffix('%').unwrap_or(unsigned);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    !cleaned.is_empty() && cleaned.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Tight bounds of the non-blank cells, end-exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeBoundingBox {
    pub first_row: usize,
    pub first_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl YeBoundingBox {
    pub fn height(&self) -> usize {
        self.end_row - self.first_row
    }

    pub fn width(&self) -> usize {
        self.end_col - self.first_col
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }
}

/// Both orientation totals, kept for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct YeOrientationScores {
    pub columns: f64,
    pub rows: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct YeStructureDetector;

impl YeStructureDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn bounding_box<S: AsRef<str>>(&self, grid: &[Vec<S>]) -> YeBoundingBox {
        let mut rows = None::<(usize, usize)>;
        let mut cols = None::<(usize, usize)>;

        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.as_ref().trim().is_empty() {
                    continue;
                }
                rows = Some(rows.map_or((r, r), |(lo, hi)| (lo.min(r), hi.max(r))));
                cols = Some(cols.map_or((c, c), |(lo, hi)| (lo.min(c), hi.max(c))));
            }
        }

        match (rows, cols) {
            (Some((r0, r1)), Some((c0, c1))) => YeBoundingBox {
                first_row: r0,
                first_col: c0,
                end_row: r1 + 1,
                end_col: c1 + 1,
            },
            _ => YeBoundingBox::default(),
        }
    }

    /// Copies the populated area into a rectangular grid.
    pub fn crop<S: AsRef<str>>(&self, grid: &[Vec<S>]) -> Vec<Vec<String>> {
        let bounds = self.bounding_box(grid);
        if bounds.is_empty() {
            return Vec::new();
        }
        grid[bounds.first_row..bounds.end_row]
            .iter()
            .map(|row| {
                (bounds.first_col..bounds.end_col)
                    .map(|c| row.get(c).map(|s| s.as_ref().to_string()).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    pub fn detect_orientation<S: AsRef<str>>(&self, grid: &[Vec<S>]) -> YeOrientation {
        self.classify(&self.crop(grid)).0
    }

    pub fn orientation_scores<S: AsRef<str>>(&self, grid: &[Vec<S>]) -> YeOrientationScores {
        self.classify(&self.crop(grid)).1
    }

    /// Detects orientation and normalizes the grid in one step.
    pub fn detect<S: AsRef<str>>(&self, name: &str, grid: &[Vec<S>]) -> YeWorksheet {
        let cropped = self.crop(grid);
        let (orientation, scores) = self.classify(&cropped);
        log::debug!(
            "sheet.detect.orientation: orientation chosen - worksheet={}, orientation={:?}, columns_score={:.3}, rows_score={:.3}",
            name,
            orientation,
            scores.columns,
            scores.rows
        );
        self.build(name, &cropped, orientation)
    }

    /// Normalizes the grid with a caller-chosen orientation.
    pub fn normalize<S: AsRef<str>>(
        &self,
        name: &str,
        grid: &[Vec<S>],
        orientation: YeOrientation,
    ) -> YeWorksheet {
        self.build(name, &self.crop(grid), orientation)
    }

    fn classify(&self, grid: &[Vec<String>]) -> (YeOrientation, YeOrientationScores) {
        let height = grid.len();
        let width = grid.first().map(Vec::len).unwrap_or(0);

        if height <= 1 || width == 0 {
            return (YeOrientation::Columns, YeOrientationScores::default());
        }
        if width == 1 {
            return (YeOrientation::Rows, YeOrientationScores::default());
        }

        let first_row: Vec<&str> = grid[0].iter().map(String::as_str).collect();
        let first_col: Vec<&str> = grid.iter().map(|row| row[0].as_str()).collect();

        let scores = YeOrientationScores {
            columns: label_likeness(&first_row) + data_consistency(grid, YeOrientation::Columns),
            rows: label_likeness(&first_col) + data_consistency(grid, YeOrientation::Rows),
        };

        let orientation = if scores.rows > scores.columns {
            YeOrientation::Rows
        } else {
            YeOrientation::Columns
        };
        (orientation, scores)
    }

    fn build(&self, name: &str, grid: &[Vec<String>], orientation: YeOrientation) -> YeWorksheet {
        let mut sheet = YeWorksheet::new(name, orientation);
        if grid.is_empty() {
            return sheet;
        }

        match orientation {
            YeOrientation::Columns => {
                for (c, header) in grid[0].iter().enumerate() {
                    let label = header.trim();
                    if label.is_empty() {
                        continue;
                    }
                    let values = grid[1..]
                        .iter()
                        .map(|row| row.get(c).cloned().unwrap_or_default())
                        .collect();
                    if !sheet.push_label(label.to_string(), values) {
                        log::debug!(
                            "sheet.detect.duplicate_label: keeping first occurrence - worksheet={}, label={}",
                            name,
                            label
                        );
                    }
                }
            }
            YeOrientation::Rows => {
                for row in grid {
                    let label = row[0].trim();
                    if label.is_empty() {
                        continue;
                    }
                    if !sheet.push_label(label.to_string(), row[1..].to_vec()) {
                        log::debug!(
                            "sheet.detect.duplicate_label: keeping first occurrence - worksheet={}, label={}",
                            name,
                            label
                        );
                    }
                }
            }
        }

        sheet.pad_rows();
        sheet
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn label_likeness(values: &[&str]) -> f64 {
    let filled: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if filled.is_empty() {
        return 0.0;
    }
    let n = filled.len();

    let unique = filled.iter().collect::<HashSet<_>>().len();
    let textual = filled.iter().filter(|v| !is_numeric_cell(v)).count();
    let short = filled
        .iter()
        .filter(|v| v.chars().count() <= SHORT_LABEL_CHARS)
        .count();
    let programmatic = filled
        .iter()
        .filter(|v| snake_case_pattern().is_match(v) || camel_case_pattern().is_match(v))
        .count();
    let proper = filled
        .iter()
        .filter(|v| proper_name_pattern().is_match(v))
        .count();

    UNIQUE_WEIGHT * ratio(unique, n)
        + TEXTUAL_WEIGHT * ratio(textual, n)
        + SHORT_WEIGHT * ratio(short, n)
        + FILL_WEIGHT * ratio(n, values.len())
        + PROGRAMMATIC_WEIGHT * ratio(programmatic, n)
        - PROPER_NAME_PENALTY * ratio(proper, n)
}

fn data_consistency(grid: &[Vec<String>], orientation: YeOrientation) -> f64 {
    let series: Vec<Vec<&str>> = match orientation {
        YeOrientation::Columns => {
            let width = grid[0].len();
            (0..width)
                .map(|c| grid[1..].iter().map(|row| row[c].as_str()).collect())
                .collect()
        }
        YeOrientation::Rows => grid
            .iter()
            .map(|row| row[1..].iter().map(String::as_str).collect())
            .collect(),
    };

    let mut total = 0.0;
    let mut counted = 0usize;
    for values in series {
        let filled: Vec<&str> = values.into_iter().filter(|v| !v.trim().is_empty()).collect();
        if filled.is_empty() {
            continue;
        }
        let numeric = ratio(filled.iter().filter(|v| is_numeric_cell(v)).count(), filled.len());
        total += numeric.max(1.0 - numeric);
        counted += 1;
    }

    if counted == 0 {
        0.0
    } else {
        CONSISTENCY_WEIGHT * total / counted as f64
    }
}
