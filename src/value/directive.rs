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

use crate::sheet::worksheet::normalize_label;

const NUMBER: &str = r"-?(?:\d+(?:\.\d*)?|\.\d+)";
const UNSIGNED: &str = r"(?:\d+(?:\.\d*)?|\.\d+)";

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{1,3})$").unwrap())
}

fn opacity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(&format!(r"^({UNSIGNED})%$")).unwrap())
}

fn dimension_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(&format!(r"^({UNSIGNED})([swh])$")).unwrap())
}

fn absolute_position_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(&format!(r"^({NUMBER})(xx|yy)$")).unwrap())
}

fn relative_position_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(&format!(r"^({NUMBER})([xy])$")).unwrap())
}

fn rotation_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(&format!(r"^({NUMBER})[º°]$")).unwrap())
}

fn measure_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(&format!(r"^({NUMBER})(px|%)?$")).unwrap())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YeVisibility {
    Show,
    Hide,
}

/// An sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl YeColor {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled into `[0, 1]`.
    pub fn to_unit(&self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum YeDimension {
    /// Width and height together (`100s`).
    Size(f64),
    Width(f64),
    Height(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YeAxis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum YePosition {
    /// Offset from the layer's current position (`20x`).
    Relative { axis: YeAxis, offset: f64 },
    /// Coordinate within the parent (`20xx`).
    Absolute { axis: YeAxis, value: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YeTextAlign {
    Left,
    Center,
    Right,
    Justified,
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum YeLineHeight {
    Auto,
    Pixels(f64),
    Percent(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum YeLetterSpacing {
    Pixels(f64),
    Percent(f64),
}

/// Which slot of a chained value a directive fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YeStyleKind {
    Visibility,
    Color,
    Opacity,
    Dimension,
    Position,
    Rotation,
    TextAlign,
    FontSize,
    LineHeight,
    LetterSpacing,
}

impl YeStyleKind {
    /// Text metrics only apply to text-capable layers.
    pub fn is_text_metric(&self) -> bool {
        matches!(
            self,
            YeStyleKind::TextAlign
                | YeStyleKind::FontSize
                | YeStyleKind::LineHeight
                | YeStyleKind::LetterSpacing
        )
    }
}

/// One recognized style token.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum YeStyleDirective {
    Visibility(YeVisibility),
    Color(YeColor),
    /// In `[0, 1]`.
    Opacity(f64),
    Dimension(YeDimension),
    Position(YePosition),
    /// Degrees, counter-clockwise positive.
    Rotation(f64),
    TextAlign(YeTextAlign),
    FontSize(f64),
    LineHeight(YeLineHeight),
    LetterSpacing(YeLetterSpacing),
}

impl YeStyleDirective {
    pub fn kind(&self) -> YeStyleKind {
        match self {
            YeStyleDirective::Visibility(_) => YeStyleKind::Visibility,
            YeStyleDirective::Color(_) => YeStyleKind::Color,
            YeStyleDirective::Opacity(_) => YeStyleKind::Opacity,
            YeStyleDirective::Dimension(_) => YeStyleKind::Dimension,
            YeStyleDirective::Position(_) => YeStyleKind::Position,
            YeStyleDirective::Rotation(_) => YeStyleKind::Rotation,
            YeStyleDirective::TextAlign(_) => YeStyleKind::TextAlign,
            YeStyleDirective::FontSize(_) => YeStyleKind::FontSize,
            YeStyleDirective::LineHeight(_) => YeStyleKind::LineHeight,
            YeStyleDirective::LetterSpacing(_) => YeStyleKind::LetterSpacing,
        }
    }
}

/// Parses one token, trying each directive family in priority order.
pub fn parse_directive(token: &str) -> Option<YeStyleDirective> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    parse_visibility(token)
        .map(YeStyleDirective::Visibility)
        .or_else(|| parse_color(token).map(YeStyleDirective::Color))
        .or_else(|| parse_opacity(token).map(YeStyleDirective::Opacity))
        .or_else(|| parse_dimension(token).map(YeStyleDirective::Dimension))
        .or_else(|| parse_position(token).map(YeStyleDirective::Position))
        .or_else(|| parse_rotation(token).map(YeStyleDirective::Rotation))
        .or_else(|| parse_text_align(token).map(YeStyleDirective::TextAlign))
        .or_else(|| parse_font_size(token).map(YeStyleDirective::FontSize))
        .or_else(|| parse_line_height(token).map(YeStyleDirective::LineHeight))
        .or_else(|| parse_letter_spacing(token).map(YeStyleDirective::LetterSpacing))
}

pub fn parse_visibility(token: &str) -> Option<YeVisibility> {
    match token.to_ascii_lowercase().as_str() {
        "show" => Some(YeVisibility::Show),
        "hide" => Some(YeVisibility::Hide),
        _ => None,
    }
}

/// `#F` and `#FF` are grayscale shorthands; `#F00` and `#FF0000` are RGB.
pub fn parse_color(token: &str) -> Option<YeColor> {
    let caps = color_pattern().captures(token)?;
    let hex = caps.get(1)?.as_str();
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        1 => channel(&hex.repeat(2)).map(YeColor::gray),
        2 => channel(hex).map(YeColor::gray),
        3 => {
            let mut parts = hex.chars().map(|c| channel(&c.to_string().repeat(2)));
            Some(YeColor::new(parts.next()??, parts.next()??, parts.next()??))
        }
        6 => Some(YeColor::new(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}

/// `0%`..`100%`, returned as a fraction.
pub fn parse_opacity(token: &str) -> Option<f64> {
    let caps = opacity_pattern().captures(token)?;
    let percent: f64 = caps.get(1)?.as_str().parse().ok()?;
    if (0.0..=100.0).contains(&percent) {
        Some(percent / 100.0)
    } else {
        None
    }
}

pub fn parse_dimension(token: &str) -> Option<YeDimension> {
    let caps = dimension_pattern().captures(token)?;
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2)?.as_str() {
        "s" => Some(YeDimension::Size(value)),
        "w" => Some(YeDimension::Width(value)),
        "h" => Some(YeDimension::Height(value)),
        _ => None,
    }
}

/// `Nxx`/`Nyy` are absolute and must be tried before `Nx`/`Ny`.
pub fn parse_position(token: &str) -> Option<YePosition> {
    if let Some(caps) = absolute_position_pattern().captures(token) {
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        let axis = if caps.get(2)?.as_str() == "xx" { YeAxis::X } else { YeAxis::Y };
        return Some(YePosition::Absolute { axis, value });
    }

    let caps = relative_position_pattern().captures(token)?;
    let offset: f64 = caps.get(1)?.as_str().parse().ok()?;
    let axis = if caps.get(2)?.as_str() == "x" { YeAxis::X } else { YeAxis::Y };
    Some(YePosition::Relative { axis, offset })
}

pub fn parse_rotation(token: &str) -> Option<f64> {
    let caps = rotation_pattern().captures(token)?;
    caps.get(1)?.as_str().parse().ok()
}

fn split_key_value(token: &str) -> Option<(String, &str)> {
    let (key, value) = token.split_once(':')?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((normalize_label(key), value))
}

pub fn parse_text_align(token: &str) -> Option<YeTextAlign> {
    let (key, value) = split_key_value(token)?;
    if key != "textalign" {
        return None;
    }
    match value.to_ascii_lowercase().as_str() {
        "left" => Some(YeTextAlign::Left),
        "center" | "centre" => Some(YeTextAlign::Center),
        "right" => Some(YeTextAlign::Right),
        "justified" | "justify" => Some(YeTextAlign::Justified),
        "top" => Some(YeTextAlign::Top),
        "middle" => Some(YeTextAlign::Middle),
        "bottom" => Some(YeTextAlign::Bottom),
        _ => None,
    }
}

pub fn parse_font_size(token: &str) -> Option<f64> {
    let (key, value) = split_key_value(token)?;
    if key != "fontsize" {
        return None;
    }
    let caps = measure_pattern().captures(value)?;
    if caps.get(2).map(|m| m.as_str()) == Some("%") {
        return None;
    }
    let size: f64 = caps.get(1)?.as_str().parse().ok()?;
    (size > 0.0).then_some(size)
}

pub fn parse_line_height(token: &str) -> Option<YeLineHeight> {
    let (key, value) = split_key_value(token)?;
    if key != "lineheight" {
        return None;
    }
    if value.eq_ignore_ascii_case("auto") {
        return Some(YeLineHeight::Auto);
    }
    let caps = measure_pattern().captures(value)?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        Some("%") => Some(YeLineHeight::Percent(amount)),
        _ => Some(YeLineHeight::Pixels(amount)),
    }
}

pub fn parse_letter_spacing(token: &str) -> Option<YeLetterSpacing> {
    let (key, value) = split_key_value(token)?;
    if key != "letterspacing" {
        return None;
    }
    let caps = measure_pattern().captures(value)?;
    let amount: f64 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        Some("%") => Some(YeLetterSpacing::Percent(amount)),
        _ => Some(YeLetterSpacing::Pixels(amount)),
    }
}
