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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dsl::ir::YeIndexDirective;
use crate::errors::{Result, YeError};

/// Settings for one sync run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YeSyncConfig {
    /// Seed for random directives; `None` seeds from the clock.
    pub random_seed: Option<u64>,
    /// Directive used when neither a layer nor its ancestors name one.
    pub default_directive: YeIndexDirective,
    /// Sync hidden layers without a `+` prefix.
    pub include_hidden: bool,
    /// Leave main component definitions alone; only instances are synced.
    pub skip_main_components: bool,
    pub expand_repeats: bool,
    pub swap_components: bool,
    /// Report progress every N processed layers.
    pub progress_every: usize,
}

impl Default for YeSyncConfig {
    fn default() -> Self {
        YeSyncConfig {
            random_seed: None,
            default_directive: YeIndexDirective::Increment,
            include_hidden: false,
            skip_main_components: true,
            expand_repeats: true,
            swap_components: true,
            progress_every: 1,
        }
    }
}

impl YeSyncConfig {
    pub fn builder() -> YeSyncConfigBuilder {
        YeSyncConfigBuilder::default()
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: YeSyncConfig = serde_json::from_str(source)
            .map_err(|e| YeError::validation(format!("Invalid JSON config: {}", e)))?;
        config.validated()
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let config: YeSyncConfig = serde_yaml::from_str(source)
            .map_err(|e| YeError::validation(format!("Invalid YAML config: {}", e)))?;
        config.validated()
    }

    /// Loads a config file, choosing the format by extension and falling
    /// back to sniffing the content.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => {
                if content.trim_start().starts_with('{') {
                    Self::from_json_str(&content)
                } else {
                    Self::from_yaml_str(&content)
                }
            }
        }
    }

    fn validated(self) -> Result<Self> {
        if self.progress_every == 0 {
            return Err(YeError::validation("progress_every must be at least 1"));
        }
        if self.default_directive == YeIndexDirective::Specific(0) {
            return Err(YeError::validation("default_directive row numbers start at 1"));
        }
        Ok(self)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct YeSyncConfigBuilder {
    pub random_seed: Option<u64>,
    pub default_directive: Option<YeIndexDirective>,
    pub include_hidden: Option<bool>,
    pub skip_main_components: Option<bool>,
    pub expand_repeats: Option<bool>,
    pub swap_components: Option<bool>,
    pub progress_every: Option<usize>,
}

impl YeSyncConfigBuilder {
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn default_directive(mut self, directive: YeIndexDirective) -> Self {
        self.default_directive = Some(directive);
        self
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = Some(include);
        self
    }

    pub fn skip_main_components(mut self, skip: bool) -> Self {
        self.skip_main_components = Some(skip);
        self
    }

    pub fn expand_repeats(mut self, expand: bool) -> Self {
        self.expand_repeats = Some(expand);
        self
    }

    pub fn swap_components(mut self, swap: bool) -> Self {
        self.swap_components = Some(swap);
        self
    }

    pub fn progress_every(mut self, every: usize) -> Self {
        self.progress_every = Some(every);
        self
    }

    /// Fills unset fields from the defaults. A zero cadence becomes 1.
    pub fn build(self) -> YeSyncConfig {
        let base = YeSyncConfig::default();
        YeSyncConfig {
            random_seed: self.random_seed.or(base.random_seed),
            default_directive: self.default_directive.unwrap_or(base.default_directive),
            include_hidden: self.include_hidden.unwrap_or(base.include_hidden),
            skip_main_components: self
                .skip_main_components
                .unwrap_or(base.skip_main_components),
            expand_repeats: self.expand_repeats.unwrap_or(base.expand_repeats),
            swap_components: self.swap_components.unwrap_or(base.swap_components),
            progress_every: self.progress_every.unwrap_or(base.progress_every).max(1),
        }
    }

    /// Never fails: malformed input yields the defaults.
    pub fn from_json(value: &Value) -> YeSyncConfig {
        let builder: YeSyncConfigBuilder = serde_json::from_value(value.clone())
            .unwrap_or_else(|_| YeSyncConfigBuilder::default());
        builder.build()
    }
}
