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

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::directive::{
    parse_directive, YeColor, YeDimension, YeLetterSpacing, YeLineHeight, YePosition,
    YeStyleDirective, YeTextAlign, YeVisibility,
};

fn separator_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[,\s]+").unwrap())
}

/// Splits a cell on commas and whitespace.
///
/// A token ending in `:` is joined with its successor so `font-size: 14`
/// stays one token.
pub fn tokenize(value: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending: Option<String> = None;

    for raw in separator_pattern().split(value.trim()) {
        if raw.is_empty() {
            continue;
        }
        let token = match pending.take() {
            Some(mut key) => {
                key.push_str(raw);
                key
            }
            None => raw.to_string(),
        };
        if token.ends_with(':') {
            pending = Some(token);
        } else {
            tokens.push(token);
        }
    }

    tokens.extend(pending);
    tokens
}

/// Style directives folded from one or more tokens.
///
/// Each kind has one slot; a later directive of the same kind replaces the
/// earlier one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct YeChainedValue {
    pub visibility: Option<YeVisibility>,
    pub color: Option<YeColor>,
    pub opacity: Option<f64>,
    pub dimension: Option<YeDimension>,
    pub position: Option<YePosition>,
    pub rotation: Option<f64>,
    pub text_align: Option<YeTextAlign>,
    pub font_size: Option<f64>,
    pub line_height: Option<YeLineHeight>,
    pub letter_spacing: Option<YeLetterSpacing>,
}

impl YeChainedValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_directive(directive: YeStyleDirective) -> Self {
        let mut value = Self::default();
        value.apply(directive);
        value
    }

    /// Folds one directive into its slot.
    pub fn apply(&mut self, directive: YeStyleDirective) {
        match directive {
            YeStyleDirective::Visibility(v) => self.visibility = Some(v),
            YeStyleDirective::Color(v) => self.color = Some(v),
            YeStyleDirective::Opacity(v) => self.opacity = Some(v),
            YeStyleDirective::Dimension(v) => self.dimension = Some(v),
            YeStyleDirective::Position(v) => self.position = Some(v),
            YeStyleDirective::Rotation(v) => self.rotation = Some(v),
            YeStyleDirective::TextAlign(v) => self.text_align = Some(v),
            YeStyleDirective::FontSize(v) => self.font_size = Some(v),
            YeStyleDirective::LineHeight(v) => self.line_height = Some(v),
            YeStyleDirective::LetterSpacing(v) => self.letter_spacing = Some(v),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn has_text_metrics(&self) -> bool {
        self.text_align.is_some()
            || self.font_size.is_some()
            || self.line_height.is_some()
            || self.letter_spacing.is_some()
    }

    /// Copy with every text-metric slot cleared.
    pub fn without_text_metrics(&self) -> Self {
        Self {
            text_align: None,
            font_size: None,
            line_height: None,
            letter_spacing: None,
            ..self.clone()
        }
    }

    /// Overlays `other` onto `self`; slots set in `other` win.
    pub fn merge(&mut self, other: &YeChainedValue) {
        self.visibility = other.visibility.or(self.visibility);
        self.color = other.color.or(self.color);
        self.opacity = other.opacity.or(self.opacity);
        self.dimension = other.dimension.or(self.dimension);
        self.position = other.position.or(self.position);
        self.rotation = other.rotation.or(self.rotation);
        self.text_align = other.text_align.or(self.text_align);
        self.font_size = other.font_size.or(self.font_size);
        self.line_height = other.line_height.or(self.line_height);
        self.letter_spacing = other.letter_spacing.or(self.letter_spacing);
    }

    /// Names of the populated slots, in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let slots = [
            ("visibility", self.visibility.is_some()),
            ("color", self.color.is_some()),
            ("opacity", self.opacity.is_some()),
            ("dimension", self.dimension.is_some()),
            ("position", self.position.is_some()),
            ("rotation", self.rotation.is_some()),
            ("text_align", self.text_align.is_some()),
            ("font_size", self.font_size.is_some()),
            ("line_height", self.line_height.is_some()),
            ("letter_spacing", self.letter_spacing.is_some()),
        ];
        slots
            .into_iter()
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }
}

/// Parses a cell holding at least two recognized directives.
///
/// Unrecognized tokens are skipped. Returns `None` when fewer than two
/// tokens parse, leaving single values to [`parse_single`].
pub fn parse_chained(value: &str) -> Option<YeChainedValue> {
    let directives: Vec<YeStyleDirective> = tokenize(value)
        .iter()
        .filter_map(|token| parse_directive(token))
        .collect();

    if directives.len() < 2 {
        return None;
    }

    let mut chained = YeChainedValue::default();
    for directive in directives {
        chained.apply(directive);
    }
    Some(chained)
}

/// Parses a cell made only of directives, at least two of them.
///
/// Unlike [`parse_chained`], one unrecognized token rejects the whole cell,
/// so prose that happens to contain `#1` or `50%` stays prose.
pub fn parse_chained_exact(value: &str) -> Option<YeChainedValue> {
    let tokens = tokenize(value);
    if tokens.len() < 2 {
        return None;
    }

    let mut chained = YeChainedValue::default();
    for token in &tokens {
        chained.apply(parse_directive(token)?);
    }
    Some(chained)
}

/// Parses a cell that is exactly one directive.
pub fn parse_single(value: &str) -> Option<YeStyleDirective> {
    match tokenize(value).as_slice() {
        [token] => parse_directive(token),
        _ => None,
    }
}

/// Chained form first, then the single form.
pub fn parse_style(value: &str) -> Option<YeChainedValue> {
    parse_chained(value).or_else(|| parse_single(value).map(YeChainedValue::from_directive))
}
