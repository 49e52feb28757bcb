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

//! # Index Tracker Module
//!
//! Decides, for each binding, which row's value it receives. The tracker is
//! stateful: `Increment` and `IncrementNonBlank` keep one cursor per
//! `(worksheet, normalized label)` so that successive layers bound to the same
//! label walk down the rows in the order the layers are processed.
//!
//! ## Lifecycle
//!
//! One tracker is created per sync run and dropped afterwards. Cursors are
//! created lazily on first access. Reusing a tracker across runs requires an
//! explicit [`YeIndexTracker::reset`].
//!
//! ## Randomness
//!
//! Random directives draw from [`YeLcg`], a small linear-congruential
//! generator, rather than an OS-seeded RNG. The same seed always replays the
//! same sequence, which keeps random bindings reproducible in tests.
//!
//! ```rust
//! use ye::{YeIndexDirective, YeIndexTracker, YeSheetData, YeWorksheet};
//!
//! let sheet = YeSheetData::single(YeWorksheet::from_columns("People", vec![("Name", vec!["Ann", "Bo"])]));
//! let mut tracker = YeIndexTracker::with_seed(7);
//! let first = tracker.resolve(&sheet, "Name", None, YeIndexDirective::Increment)?;
//! assert_eq!(first.value, "Ann");
//! # Ok::<(), ye::YeError>(())
//! ```

use std::collections::HashMap;

use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::dsl::ir::YeIndexDirective;
use crate::errors::{Result, YeError};
use crate::sheet::worksheet::{normalize_label, YeSheetData, YeWorksheet};

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

/// Seedable linear-congruential generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YeLcg {
    state: u64,
}

impl YeLcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from the current wall clock.
    pub fn from_time() -> Self {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        Self::new(nanos as u64)
    }
}

impl RngCore for YeLcg {
    fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        (self.state >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.next_u32() as u64;
        let low = self.next_u32() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for YeLcg {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}

/// A concrete row picked for a binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeResolvedValue {
    /// Name of the worksheet the value came from.
    pub worksheet: String,
    /// Label as stored in the worksheet (may differ in case or separators).
    pub label: String,
    /// 0-based row index.
    pub index: usize,
    pub value: String,
}

#[derive(Clone, Copy, Debug, Default)]
struct YeCursor {
    all: usize,
    non_blank: usize,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct YeCursorKey {
    worksheet: String,
    label: String,
}

/// Stateful row selector shared by every binding of one run.
#[derive(Clone, Debug)]
pub struct YeIndexTracker {
    cursors: HashMap<YeCursorKey, YeCursor>,
    rng: YeLcg,
}

impl Default for YeIndexTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl YeIndexTracker {
    /// Creates a tracker seeded from the clock.
    pub fn new() -> Self {
        Self {
            cursors: HashMap::new(),
            rng: YeLcg::from_time(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            cursors: HashMap::new(),
            rng: YeLcg::seed_from_u64(seed),
        }
    }

    /// Creates a tracker from an optional seed, falling back to the clock.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map(Self::with_seed).unwrap_or_default()
    }

    /// Resolves `label` in the named worksheet (or the active one).
    pub fn resolve(
        &mut self,
        sheet: &YeSheetData,
        label: &str,
        worksheet: Option<&str>,
        directive: YeIndexDirective,
    ) -> Result<YeResolvedValue> {
        let target = sheet
            .worksheet(worksheet)
            .ok_or_else(|| YeError::worksheet_not_found(worksheet.unwrap_or(sheet.active_worksheet.as_str())))?;
        self.resolve_in(target, label, directive)
    }

    /// Resolves `label` in a specific worksheet.
    pub fn resolve_in(
        &mut self,
        worksheet: &YeWorksheet,
        label: &str,
        directive: YeIndexDirective,
    ) -> Result<YeResolvedValue> {
        let stored = worksheet
            .find_label(label)
            .ok_or_else(|| YeError::label_not_found(label, &worksheet.name))?;
        let values = worksheet
            .rows
            .get(stored)
            .map(Vec::as_slice)
            .unwrap_or_default();
        if values.is_empty() {
            return Err(YeError::empty_values(stored, &worksheet.name));
        }

        let key = YeCursorKey {
            worksheet: worksheet.name.clone(),
            label: normalize_label(label),
        };

        let index = match directive {
            YeIndexDirective::Specific(n) => n.saturating_sub(1).min(values.len() - 1),
            YeIndexDirective::Increment => {
                let cursor = self.cursors.entry(key).or_default();
                let index = cursor.all % values.len();
                cursor.all = (index + 1) % values.len();
                index
            }
            YeIndexDirective::IncrementNonBlank => {
                let candidates = non_blank_indices(values);
                if candidates.is_empty() {
                    return Err(YeError::no_non_blank(stored, &worksheet.name));
                }
                let cursor = self.cursors.entry(key).or_default();
                let position = cursor.non_blank % candidates.len();
                cursor.non_blank = (position + 1) % candidates.len();
                candidates[position]
            }
            YeIndexDirective::Random => self.rng.gen_range(0..values.len()),
            YeIndexDirective::RandomNonBlank => {
                let candidates = non_blank_indices(values);
                if candidates.is_empty() {
                    return Err(YeError::no_non_blank(stored, &worksheet.name));
                }
                candidates[self.rng.gen_range(0..candidates.len())]
            }
        };

        log::debug!(
            "tracker.resolve: row selected - worksheet={}, label={}, directive={}, index={}",
            worksheet.name,
            stored,
            directive,
            index
        );

        Ok(YeResolvedValue {
            worksheet: worksheet.name.clone(),
            label: stored.to_string(),
            index,
            value: values[index].clone(),
        })
    }

    /// Clears every cursor.
    pub fn reset(&mut self) {
        self.cursors.clear();
    }

    /// Clears the cursors of one label across all worksheets.
    pub fn reset_label(&mut self, label: &str) {
        let normalized = normalize_label(label);
        self.cursors.retain(|key, _| key.label != normalized);
    }

    /// Number of live `(worksheet, label)` cursors.
    pub fn counter_count(&self) -> usize {
        self.cursors.len()
    }
}

fn non_blank_indices(values: &[String]) -> Vec<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(i, _)| i)
        .collect()
}
