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

//! # Sheet Ingestion Module
//!
//! Loads raw cell grids and turns them into [`YeSheetData`](crate::YeSheetData)
//! through the structure detector, so callers never deal with orientation.
//!
//! ## Module Components
//!
//! - **Format Detection** ([format.rs](format/index.html)): extension and
//!   content sniffing
//! - **Reader** ([reader.rs](reader/index.html)): grid parsing and sheet
//!   assembly
//!
//! ## Supported Input Formats
//!
//! - **JSON**: an array of row arrays, or an object of named grids
//! - **YAML**: a sequence of row sequences
//! - **CSV**: headerless, ragged rows allowed (feature `csv`)
//!
//! ## Usage
//!
//! ```rust
//! use ye::ingest::YeGridReader;
//!
//! let reader = YeGridReader::new();
//! let sheet = reader.read_json_workbook(r#"[["Name"], ["Ann"], ["Bo"]]"#, "People")?;
//! assert_eq!(sheet.active_worksheet, "People");
//! ```

pub mod format;
pub mod reader;

pub use format::{YeGridFormat, YeGridFormatDetector};
pub use reader::{YeGrid, YeGridReader};
