//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use std::sync::OnceLock;

use regex::Regex;

use crate::dsl::ir::{YeBindingDescriptor, YeIndexDirective};

const IGNORE_PREFIX: char = '-';
const FORCE_INCLUDE_PREFIX: char = '+';
const REPEAT_MARKER: &str = "@#";
const WORKSHEET_MARKER: &str = "//";

fn label_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"#([A-Za-z][A-Za-z0-9_-]*)").unwrap())
}

fn index_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\.(\d+|n|i|x|r)\s*$").unwrap())
}

/// Parser for the layer-name binding grammar.
///
/// ```text
/// [-|+] [@#] [// Worksheet] #Label [#Label ...] [.n|.i|.x|.r|.<digits>]
/// ```
///
/// Parsing never fails. Fragments that do not match the grammar are dropped so
/// that arbitrary layer names can be traversed safely.
#[derive(Clone, Copy, Debug, Default)]
pub struct YeLabelParser;

impl YeLabelParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, name: &str) -> YeBindingDescriptor {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return YeBindingDescriptor::empty();
        }

        if trimmed.starts_with(IGNORE_PREFIX) {
            return YeBindingDescriptor::ignored();
        }

        let (force_include, body) = match trimmed.strip_prefix(FORCE_INCLUDE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let is_repeat_container = body.contains(REPEAT_MARKER);
        let (index, without_index) = self.split_index(body);
        let worksheet = self.parse_worksheet(without_index);
        let labels = self.parse_labels(without_index);

        YeBindingDescriptor {
            has_binding: !labels.is_empty(),
            labels,
            worksheet,
            index,
            is_ignored: false,
            force_include,
            is_repeat_container,
        }
    }

    /// Splits a trailing index suffix off `body`.
    fn split_index<'a>(&self, body: &'a str) -> (Option<YeIndexDirective>, &'a str) {
        let Some(caps) = index_pattern().captures(body) else {
            return (None, body);
        };
        let (Some(whole), Some(token)) = (caps.get(0), caps.get(1)) else {
            return (None, body);
        };

        let token = token.as_str();
        let directive = if token.bytes().all(|b| b.is_ascii_digit()) {
            // Out-of-range literals saturate; the tracker clamps them anyway.
            YeIndexDirective::Specific(token.parse::<usize>().unwrap_or(usize::MAX))
        } else {
            match token.to_ascii_lowercase().as_str() {
                "n" => YeIndexDirective::Increment,
                "i" => YeIndexDirective::IncrementNonBlank,
                "x" => YeIndexDirective::Random,
                "r" => YeIndexDirective::RandomNonBlank,
                _ => return (None, body),
            }
        };

        (Some(directive), &body[..whole.start()])
    }

    fn parse_worksheet(&self, body: &str) -> Option<String> {
        let start = body.find(WORKSHEET_MARKER)? + WORKSHEET_MARKER.len();
        let rest = &body[start..];
        let end = rest.find('#').unwrap_or(rest.len());
        let name = rest[..end].trim().trim_end_matches('@').trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }

    fn parse_labels(&self, body: &str) -> Vec<String> {
        // Labels never appear inside the worksheet name, which ends at the
        // first '#'; scanning the whole body is therefore safe.
        label_pattern()
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Parses a single layer name with the default parser.
pub fn parse_layer_name(name: &str) -> YeBindingDescriptor {
    YeLabelParser::new().parse(name)
}
