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

//! # Ye Core Library
//!
//! Ye drives design layers from tabular data. Layers opt in through short
//! annotations in their names (`#Name`, `#Price.3`, `// People #Photo.r`);
//! Ye parses those annotations, picks a row for every binding and hands the
//! resulting value to the host document as text, a component swap or a set
//! of style directives.
//!
//! ## Module Overview
//!
//! - **dsl**: layer-name grammar and ancestor inheritance
//! - **sheet**: worksheets, sheet data and orientation detection
//! - **tracker**: stateful row selection under the five index directives
//! - **value**: chained style values and variant selection syntax
//! - **capability**: traits the host document implements
//! - **component**: name and variant lookup of swappable components
//! - **sync**: the phased sync engine and its run report
//! - **config**: run configuration and its loaders
//! - **ingest**: JSON, YAML and CSV grid loading
//!
//! ## Feature Flags
//!
//! - `csv`: CSV grid ingestion
//! - `full`: Enables all features
//!
//! ## Quick Start
//!
//! ```rust
//! use ye::{YeIndexDirective, YeIndexTracker, YeSheetData, YeWorksheet, parse_layer_name};
//!
//! let sheet = YeSheetData::single(YeWorksheet::from_columns(
//!     "People",
//!     vec![("Name", vec!["Ann", "Bo"])],
//! ));
//! let descriptor = parse_layer_name("#Name.n");
//! let mut tracker = YeIndexTracker::with_seed(1);
//! let label = descriptor.primary_label().unwrap();
//! let first = tracker.resolve(&sheet, label, None, YeIndexDirective::Increment)?;
//! let second = tracker.resolve(&sheet, label, None, YeIndexDirective::Increment)?;
//! assert_eq!((first.value.as_str(), second.value.as_str()), ("Ann", "Bo"));
//! ```
//!
//! ## Architecture
//!
//! A sync run ([`YeSyncEngine`]) moves through five phases:
//! 1. **Preparation**: component lookup
//! 2. **Repeat expansion**: `@#` containers resized to their row count
//! 3. **Enumeration**: bound layers collected with inherited descriptors
//! 4. **Resolution**: one row per binding, dispatched to the host
//! 5. **Aggregation**: partial-success policy applied to the report
//!
//! ## Error Handling
//!
//! Library calls return `Result<T, YeError>`. Inside a run, per-layer errors
//! are collected in [`YeSyncRunResult`] instead of being returned, and only a
//! host failure flagged as fatal stops the run.

pub mod capability;
pub mod component;
pub mod config;
pub mod dsl;
pub mod errors;
pub mod ingest;
pub mod sheet;
pub mod sync;
pub mod tracker;
pub mod value;

pub use errors::{Result, YeError};

pub use capability::{
    YeCapabilityError, YeComponentInfo, YeContainerMutator, YeContentSetter, YeHost, YeLayerInfo,
    YeLayerKind, YeNodeId, YeResourceTest, YeSceneGraph, YeStyleApplier, YeUrlResourceTest,
};
pub use component::YeComponentIndex;
pub use config::{YeSyncConfig, YeSyncConfigBuilder};
pub use dsl::{parse_layer_name, resolve_inherited, YeBindingDescriptor, YeIndexDirective, YeLabelParser};
pub use ingest::{YeGrid, YeGridFormat, YeGridFormatDetector, YeGridReader};
pub use sheet::{
    is_numeric_cell, normalize_label, YeBoundingBox, YeOrientation, YeOrientationScores, YeSheetData,
    YeStructureDetector, YeWorksheet,
};
pub use sync::{
    YeDeferredRequest, YeLayerError, YeProgress, YeRepeatOutcome, YeSyncEngine, YeSyncRunResult,
    YeTraversalPolicy, YeVisitedLayer,
};
pub use tracker::{YeIndexTracker, YeLcg, YeResolvedValue};
pub use value::{
    parse_chained, parse_chained_exact, parse_directive, parse_single, parse_style,
    parse_variant_properties, YeAxis, YeChainedValue, YeColor, YeDimension, YeLetterSpacing,
    YeLineHeight, YePosition, YeStyleDirective, YeStyleKind, YeTextAlign, YeVisibility,
};
