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

//! # Sheet Module
//!
//! Tabular data model and structure detection.
//!
//! - **Worksheet** ([worksheet.rs](worksheet/index.html)): `YeWorksheet`,
//!   `YeSheetData` and the label normalization shared by every lookup
//! - **Detection** ([detect.rs](detect/index.html)): bounding box, orientation
//!   heuristics and grid normalization

pub mod detect;
pub mod worksheet;

pub use detect::{is_numeric_cell, YeBoundingBox, YeOrientationScores, YeStructureDetector};
pub use worksheet::{normalize_label, YeOrientation, YeSheetData, YeWorksheet};
