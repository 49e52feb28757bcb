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

//! # Component Lookup
//!
//! Name and variant index over the host's main components, built once per
//! run before any layer is resolved. Names compare through
//! [`normalize_label`], so `"Primary Button"` finds `primary-button`.

use std::collections::HashMap;

use crate::capability::YeComponentInfo;
use crate::sheet::worksheet::normalize_label;
use crate::value::variant::parse_variant_properties;

#[derive(Clone, Debug, Default)]
pub struct YeComponentIndex {
    components: Vec<YeComponentInfo>,
    by_name: HashMap<String, usize>,
}

impl YeComponentIndex {
    /// Indexes `components`; on a name collision the first one wins.
    pub fn new(components: Vec<YeComponentInfo>) -> Self {
        let mut by_name = HashMap::new();
        for (position, component) in components.iter().enumerate() {
            by_name
                .entry(normalize_label(&component.name))
                .or_insert(position);
        }
        Self { components, by_name }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[YeComponentInfo] {
        &self.components
    }

    pub fn find_by_name(&self, name: &str) -> Option<&YeComponentInfo> {
        self.by_name
            .get(&normalize_label(name))
            .map(|&position| &self.components[position])
    }

    /// Finds the sibling variant of `current` selected by `requested`.
    ///
    /// Properties not named in `requested` keep the values `current` has. When
    /// no variant matches that full combination, any variant of the set
    /// matching just the requested pairs is accepted.
    pub fn find_variant(
        &self,
        current: &YeComponentInfo,
        requested: &[(String, String)],
    ) -> Option<&YeComponentInfo> {
        let set = normalize_label(current.set_name.as_deref()?);
        let siblings: Vec<&YeComponentInfo> = self
            .components
            .iter()
            .filter(|c| c.set_name.as_deref().map(normalize_label).as_deref() == Some(set.as_str()))
            .collect();

        let mut desired: Vec<(String, String)> = current.properties.clone();
        for (key, value) in requested {
            match desired
                .iter_mut()
                .find(|(existing, _)| normalize_label(existing) == normalize_label(key))
            {
                Some(slot) => slot.1 = value.clone(),
                None => desired.push((key.clone(), value.clone())),
            }
        }

        siblings
            .iter()
            .find(|c| matches_all(c, &desired))
            .or_else(|| siblings.iter().find(|c| matches_all(c, requested)))
            .copied()
    }

    /// Resolves a cell value to a component for an instance.
    ///
    /// Variant syntax selects within the instance's current set; anything
    /// else is matched by name.
    pub fn resolve(
        &self,
        value: &str,
        current: Option<&YeComponentInfo>,
    ) -> Option<&YeComponentInfo> {
        if let Some(requested) = parse_variant_properties(value) {
            return current.and_then(|current| self.find_variant(current, &requested));
        }
        self.find_by_name(value)
    }
}

fn matches_all(component: &YeComponentInfo, pairs: &[(String, String)]) -> bool {
    pairs.iter().all(|(key, value)| {
        component.properties.iter().any(|(k, v)| {
            normalize_label(k) == normalize_label(key) && normalize_label(v) == normalize_label(value)
        })
    })
}
