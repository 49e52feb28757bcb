//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd project team.
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

use std::fmt;

use serde::{Deserialize, Serialize};

/// Policy for choosing which row a binding resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum YeIndexDirective {
    /// 1-based row number, clamped into range at resolution time.
    Specific(usize),
    Increment,
    IncrementNonBlank,
    Random,
    RandomNonBlank,
}

impl Default for YeIndexDirective {
    fn default() -> Self {
        YeIndexDirective::Increment
    }
}

impl YeIndexDirective {
    /// Whether the directive only ever selects rows with a non-blank value.
    pub fn skips_blank(&self) -> bool {
        matches!(
            self,
            YeIndexDirective::IncrementNonBlank | YeIndexDirective::RandomNonBlank
        )
    }
}

impl fmt::Display for YeIndexDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YeIndexDirective::Specific(n) => write!(f, ".{n}"),
            YeIndexDirective::Increment => f.write_str(".n"),
            YeIndexDirective::IncrementNonBlank => f.write_str(".i"),
            YeIndexDirective::Random => f.write_str(".x"),
            YeIndexDirective::RandomNonBlank => f.write_str(".r"),
        }
    }
}

/// Binding instructions extracted from one layer name.
///
/// `labels` keeps the order in which labels appear in the name. The first
/// label is the primary one and supplies the layer's content; the rest feed
/// style directives.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeBindingDescriptor {
    pub has_binding: bool,
    pub labels: Vec<String>,
    pub worksheet: Option<String>,
    pub index: Option<YeIndexDirective>,
    pub is_ignored: bool,
    pub force_include: bool,
    pub is_repeat_container: bool,
}

impl YeBindingDescriptor {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn ignored() -> Self {
        Self {
            is_ignored: true,
            ..Self::default()
        }
    }

    pub fn primary_label(&self) -> Option<&str> {
        self.labels.first().map(String::as_str)
    }

    pub fn secondary_labels(&self) -> &[String] {
        if self.labels.len() > 1 {
            &self.labels[1..]
        } else {
            &[]
        }
    }

    /// The directive to use, falling back to `default` when none was set.
    pub fn directive_or(&self, default: YeIndexDirective) -> YeIndexDirective {
        self.index.unwrap_or(default)
    }
}
