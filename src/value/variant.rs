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

//! Variant selection syntax: `Property=Value, Property=Value`.

/// True when `value` starts with an `http://` or `https://` scheme.
pub fn is_url(value: &str) -> bool {
    let lower = value.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parses `Size=Large, State=Hover` into ordered pairs.
///
/// Returns `None` for URLs, for values without `=`, and when any
/// comma-separated segment lacks a non-empty property or value.
pub fn parse_variant_properties(value: &str) -> Option<Vec<(String, String)>> {
    let value = value.trim();
    if value.is_empty() || is_url(value) || !value.contains('=') {
        return None;
    }

    let mut pairs = Vec::new();
    for segment in value.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (property, selected) = segment.split_once('=')?;
        let (property, selected) = (property.trim(), selected.trim());
        if property.is_empty() || selected.is_empty() {
            return None;
        }
        pairs.push((property.to_string(), selected.to_string()));
    }

    (!pairs.is_empty()).then_some(pairs)
}

/// Whether `value` should be read as a variant selection.
pub fn is_variant_reference(value: &str) -> bool {
    parse_variant_properties(value).is_some()
}
