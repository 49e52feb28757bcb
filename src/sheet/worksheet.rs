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

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Canonical form used to compare labels, worksheet names and component names.
///
/// Lowercases and strips spaces, underscores and hyphens, so that
/// `"First Name"`, `"first_name"` and `"FIRST-NAME"` compare equal.
pub fn normalize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-') && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Direction in which labels run in a source grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YeOrientation {
    /// Labels across the first row; every label is a column.
    #[default]
    Columns,
    /// Labels down the first column; every label is a row.
    Rows,
}

/// One sheet tab normalized into a label to values mapping.
///
/// Every key of `rows` appears in `labels` and every value array has the
/// same length (the row count).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeWorksheet {
    pub name: String,
    pub labels: Vec<String>,
    pub rows: HashMap<String, Vec<String>>,
    pub orientation: YeOrientation,
}

impl YeWorksheet {
    pub fn new(name: impl Into<String>, orientation: YeOrientation) -> Self {
        Self {
            name: name.into(),
            labels: Vec::new(),
            rows: HashMap::new(),
            orientation,
        }
    }

    /// Builds a worksheet from `(label, values)` columns.
    ///
    /// Shorter columns are padded with empty strings; a repeated label keeps
    /// its first occurrence.
    pub fn from_columns<I, L, V>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = (L, Vec<V>)>,
        L: Into<String>,
        V: Into<String>,
    {
        let mut sheet = Self::new(name, YeOrientation::Columns);
        for (label, values) in columns {
            sheet.push_label(label.into(), values.into_iter().map(Into::into).collect());
        }
        sheet.pad_rows();
        sheet
    }

    pub(crate) fn push_label(&mut self, label: String, values: Vec<String>) -> bool {
        if self.rows.contains_key(&label) {
            return false;
        }
        self.labels.push(label.clone());
        self.rows.insert(label, values);
        true
    }

    pub(crate) fn pad_rows(&mut self) {
        let count = self.rows.values().map(Vec::len).max().unwrap_or(0);
        for values in self.rows.values_mut() {
            values.resize(count, String::new());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.labels
            .first()
            .and_then(|label| self.rows.get(label))
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Finds the label stored in this worksheet that `label` refers to.
    ///
    /// Exact matches win over normalized matches.
    pub fn find_label(&self, label: &str) -> Option<&str> {
        if let Some(found) = self.labels.iter().find(|l| l.as_str() == label) {
            return Some(found.as_str());
        }
        let wanted = normalize_label(label);
        self.labels
            .iter()
            .find(|l| normalize_label(l) == wanted)
            .map(String::as_str)
    }

    pub fn values(&self, label: &str) -> Option<&[String]> {
        let found = self.find_label(label)?;
        self.rows.get(found).map(Vec::as_slice)
    }
}

/// All worksheets of one data source plus the one selected by default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeSheetData {
    pub worksheets: Vec<YeWorksheet>,
    pub active_worksheet: String,
}

impl YeSheetData {
    /// Creates sheet data whose active worksheet is the first one.
    pub fn new(worksheets: Vec<YeWorksheet>) -> Self {
        let active_worksheet = worksheets
            .first()
            .map(|w| w.name.clone())
            .unwrap_or_default();
        Self {
            worksheets,
            active_worksheet,
        }
    }

    pub fn single(worksheet: YeWorksheet) -> Self {
        Self::new(vec![worksheet])
    }

    pub fn with_active(mut self, name: impl Into<String>) -> Self {
        self.active_worksheet = name.into();
        self
    }

    /// Worksheet by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&YeWorksheet> {
        self.worksheets
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name.trim()))
    }

    /// The active worksheet, or the first one when the active name is stale.
    pub fn active(&self) -> Option<&YeWorksheet> {
        self.find(&self.active_worksheet)
            .or_else(|| self.worksheets.first())
    }

    /// Worksheet by name, falling back to the active worksheet.
    pub fn worksheet(&self, name: Option<&str>) -> Option<&YeWorksheet> {
        match name {
            Some(name) => self.find(name).or_else(|| {
                log::warn!(
                    "sheet.worksheet.fallback: worksheet not found, using active - requested={}, active={}",
                    name,
                    self.active_worksheet
                );
                self.active()
            }),
            None => self.active(),
        }
    }
}
