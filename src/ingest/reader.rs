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

use std::path::Path;

use serde_json::Value;

use crate::errors::{Result, YeError};
use crate::ingest::format::{YeGridFormat, YeGridFormatDetector};
use crate::sheet::detect::YeStructureDetector;
use crate::sheet::worksheet::{YeSheetData, YeWorksheet};

/// A raw grid of cell strings, row-major.
pub type YeGrid = Vec<Vec<String>>;

/// Loads grids from JSON, YAML or CSV and normalizes them into sheet data.
#[derive(Clone, Debug, Default)]
pub struct YeGridReader {
    detector: YeStructureDetector,
    formats: YeGridFormatDetector,
}

impl YeGridReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON array of arrays. Scalars become strings; `null` is blank.
    pub fn read_json_grid(&self, source: &str) -> Result<YeGrid> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| YeError::validation(format!("Invalid JSON grid: {}", e)))?;
        grid_from_value(&value)
    }

    /// Parses a YAML sequence of sequences.
    pub fn read_yaml_grid(&self, source: &str) -> Result<YeGrid> {
        let value: Value = serde_yaml::from_str(source)
            .map_err(|e| YeError::validation(format!("Invalid YAML grid: {}", e)))?;
        grid_from_value(&value)
    }

    /// Parses CSV without treating the first record as a header; ragged rows
    /// are accepted.
    #[cfg(feature = "csv")]
    pub fn read_csv_grid(&self, source: &str) -> Result<YeGrid> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source.as_bytes());

        let mut grid = Vec::new();
        for record in reader.records() {
            let record = record?;
            grid.push(record.iter().map(str::to_string).collect());
        }
        Ok(grid)
    }

    /// Reads a grid file, choosing the parser by extension, then content.
    pub fn read_grid_path(&self, path: &Path) -> Result<YeGrid> {
        let content = std::fs::read_to_string(path)?;
        let format = match self.formats.detect_from_path(path) {
            YeGridFormat::Unknown => self.formats.detect_from_content(&content),
            known => known,
        };
        self.read_grid_str(&content, format)
    }

    pub fn read_grid_str(&self, content: &str, format: YeGridFormat) -> Result<YeGrid> {
        match format {
            YeGridFormat::Json => self.read_json_grid(content),
            YeGridFormat::Yaml => self.read_yaml_grid(content),
            #[cfg(feature = "csv")]
            YeGridFormat::Csv => self.read_csv_grid(content),
            #[cfg(not(feature = "csv"))]
            YeGridFormat::Csv => Err(YeError::validation("CSV support requires the `csv` feature")),
            YeGridFormat::Unknown => Err(YeError::validation("Unrecognized grid format")),
        }
    }

    /// Normalizes one grid through orientation detection.
    pub fn worksheet<S: AsRef<str>>(&self, name: &str, grid: &[Vec<S>]) -> YeWorksheet {
        self.detector.detect(name, grid)
    }

    /// Assembles sheet data from named grids; the first one is active.
    pub fn sheet_data<I, N>(&self, grids: I) -> Result<YeSheetData>
    where
        I: IntoIterator<Item = (N, YeGrid)>,
        N: Into<String>,
    {
        let worksheets: Vec<YeWorksheet> = grids
            .into_iter()
            .map(|(name, grid)| {
                let name: String = name.into();
                self.worksheet(&name, &grid)
            })
            .collect();
        if worksheets.is_empty() {
            return Err(YeError::validation("Sheet data needs at least one worksheet"));
        }
        Ok(YeSheetData::new(worksheets))
    }

    /// Reads a JSON workbook.
    ///
    /// Accepts either one grid (named `default_name`) or an object mapping
    /// worksheet names to grids.
    pub fn read_json_workbook(&self, source: &str, default_name: &str) -> Result<YeSheetData> {
        let value: Value = serde_json::from_str(source)
            .map_err(|e| YeError::validation(format!("Invalid JSON workbook: {}", e)))?;

        match &value {
            Value::Array(_) => self.sheet_data([(default_name.to_string(), grid_from_value(&value)?)]),
            Value::Object(map) => {
                let mut grids = Vec::with_capacity(map.len());
                for (name, grid) in map {
                    grids.push((name.clone(), grid_from_value(grid)?));
                }
                self.sheet_data(grids)
            }
            _ => Err(YeError::validation("JSON workbook must be an array or object")),
        }
    }

    /// Reads one grid file into single-worksheet sheet data named after the
    /// file stem.
    pub fn read_path(&self, path: &Path) -> Result<YeSheetData> {
        let grid = self.read_grid_path(path)?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Sheet1")
            .to_string();
        log::debug!(
            "ingest.read: grid loaded - path={}, rows={}",
            path.display(),
            grid.len()
        );
        self.sheet_data([(name, grid)])
    }
}

fn grid_from_value(value: &Value) -> Result<YeGrid> {
    let rows = value
        .as_array()
        .ok_or_else(|| YeError::validation("Grid must be an array of rows"))?;

    rows.iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Array(cells) => Ok(cells.iter().map(cell_text).collect()),
            Value::Null => Ok(Vec::new()),
            _ => Err(YeError::validation(format!("Grid row {} is not an array", index))),
        })
        .collect()
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
