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

//! # Sync Module
//!
//! - **Engine** ([engine.rs](engine/index.html)): the phased orchestrator
//! - **Traversal** ([traverse.rs](traverse/index.html)): bound-layer
//!   enumeration with inherited descriptors
//! - **Repeat** ([repeat.rs](repeat/index.html)): container expansion with
//!   rollback
//! - **Report** ([report.rs](report/index.html)): run results, per-layer
//!   errors, deferred requests and progress

pub mod engine;
pub mod repeat;
pub mod report;
pub mod traverse;

pub use engine::YeSyncEngine;
pub use repeat::{expand_container, repeat_count, repeat_source, YeRepeatOutcome, YeRepeatSource};
pub use report::{YeDeferredRequest, YeLayerError, YeProgress, YeSyncRunResult};
pub use traverse::{bound_layers, descendants, enumerate_layers, YeTraversalPolicy, YeVisitedLayer};
