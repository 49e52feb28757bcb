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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YeGridFormat {
    Json,
    Yaml,
    Csv,
    Unknown,
}

/// Guesses the format of a grid source.
#[derive(Clone, Copy, Debug, Default)]
pub struct YeGridFormatDetector;

impl YeGridFormatDetector {
    pub fn new() -> Self {
        Self
    }

    /// Format by extension; `Unknown` when the extension says nothing.
    pub fn detect_from_path(&self, path: &Path) -> YeGridFormat {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => YeGridFormat::Json,
            "yaml" | "yml" => YeGridFormat::Yaml,
            "csv" | "tsv" => YeGridFormat::Csv,
            _ => YeGridFormat::Unknown,
        }
    }

    pub fn detect_from_content(&self, content: &str) -> YeGridFormat {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return YeGridFormat::Unknown;
        }
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            return YeGridFormat::Json;
        }
        if trimmed.starts_with("- ") || trimmed.starts_with("---") {
            return YeGridFormat::Yaml;
        }
        if trimmed.contains(',') || trimmed.contains('\n') {
            return YeGridFormat::Csv;
        }
        YeGridFormat::Unknown
    }
}
