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

use serde::{Deserialize, Serialize};

use crate::capability::{YeLayerInfo, YeNodeId};
use crate::errors::YeError;

/// A failure attached to one layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YeLayerError {
    pub layer_name: String,
    pub layer_id: YeNodeId,
    pub message: String,
    pub error: YeError,
}

impl YeLayerError {
    pub fn new(layer: &YeLayerInfo, error: YeError) -> Self {
        Self {
            layer_name: layer.name.clone(),
            layer_id: layer.id.clone(),
            message: error.to_string(),
            error,
        }
    }
}

/// A resource reference left for the host to fetch and apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeDeferredRequest {
    pub layer_id: YeNodeId,
    pub layer_name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YeProgress {
    pub message: String,
    /// `0.0..=100.0`
    pub percent: f64,
    pub processed: usize,
    pub total: usize,
}

impl YeProgress {
    pub fn new(message: impl Into<String>, processed: usize, total: usize) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            (processed as f64 / total as f64 * 100.0).min(100.0)
        };
        Self {
            message: message.into(),
            percent,
            processed,
            total,
        }
    }

    /// Phase-boundary event reported before any layer is processed.
    pub fn phase(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            percent: 0.0,
            processed: 0,
            total: 0,
        }
    }
}

/// Aggregate outcome of one sync run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct YeSyncRunResult {
    pub success: bool,
    pub layers_processed: usize,
    pub layers_updated: usize,
    pub errors: Vec<YeLayerError>,
    pub warnings: Vec<String>,
    pub pending_deferred: Vec<YeDeferredRequest>,
    /// Set when a non-recoverable failure stopped the run early.
    pub aborted: bool,
}

impl YeSyncRunResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Whether some errors occurred but the run still counts as a success.
    pub fn is_partial(&self) -> bool {
        self.success && self.has_errors()
    }

    /// Applies the partial-success policy.
    ///
    /// An aborted run fails. Otherwise the run succeeds when nothing went
    /// wrong or when at least one layer was updated.
    pub(crate) fn finalize(&mut self) {
        self.success = !self.aborted && (self.errors.is_empty() || self.layers_updated > 0);
    }

    pub fn summary(&self) -> String {
        format!(
            "processed={}, updated={}, errors={}, warnings={}, deferred={}, aborted={}",
            self.layers_processed,
            self.layers_updated,
            self.errors.len(),
            self.warnings.len(),
            self.pending_deferred.len(),
            self.aborted
        )
    }
}
