//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd Team.

use ye::{
    parse_chained, parse_directive, parse_style, YeAxis, YeColor, YeDimension, YeLetterSpacing,
    YeLineHeight, YePosition, YeStyleDirective, YeTextAlign, YeVisibility,
};

#[test]
fn test_chained_fields_accumulate() {
    let value = parse_chained("50%, #F00, 30º").unwrap();
    assert_eq!(value.opacity, Some(0.5));
    assert_eq!(value.color, Some(YeColor::new(255, 0, 0)));
    assert_eq!(value.rotation, Some(30.0));
    assert_eq!(value.field_names(), vec!["color", "opacity", "rotation"]);
}

#[test]
fn test_later_directive_of_same_kind_wins() {
    let value = parse_chained("#F00, #0F0").unwrap();
    assert_eq!(value.color, Some(YeColor::new(0, 255, 0)));
    assert_eq!(value.field_names(), vec!["color"]);
}

#[test]
fn test_whitespace_and_commas_both_separate() {
    let value = parse_chained("hide   100w,20h  -10xx").unwrap();
    assert_eq!(value.visibility, Some(YeVisibility::Hide));
    assert_eq!(value.dimension, Some(YeDimension::Height(20.0)));
    assert_eq!(value.position, Some(YePosition::Absolute { axis: YeAxis::X, value: -10.0 }));
}

#[test]
fn test_key_value_split_by_whitespace_is_rejoined() {
    let value = parse_chained("font-size: 18, line-height: 120%, letter-spacing: 1px, text-align: center").unwrap();
    assert_eq!(value.font_size, Some(18.0));
    assert_eq!(value.line_height, Some(YeLineHeight::Percent(120.0)));
    assert_eq!(value.letter_spacing, Some(YeLetterSpacing::Pixels(1.0)));
    assert_eq!(value.text_align, Some(YeTextAlign::Center));
    assert!(value.has_text_metrics());
}

#[test]
fn test_single_directive_is_not_chained() {
    assert!(parse_chained("#FF0000").is_none());
    assert!(parse_chained("Hello world").is_none());
    assert_eq!(
        parse_style("#FF0000").map(|v| v.color),
        Some(Some(YeColor::new(255, 0, 0)))
    );
    assert!(parse_style("Hello world").is_none());
}

#[test]
fn test_unrecognized_tokens_do_not_block_a_chain() {
    let value = parse_chained("show, banana, 45°").unwrap();
    assert_eq!(value.visibility, Some(YeVisibility::Show));
    assert_eq!(value.rotation, Some(45.0));
}

#[test]
fn test_color_shorthands() {
    assert_eq!(parse_directive("#A"), Some(YeStyleDirective::Color(YeColor::gray(0xAA))));
    assert_eq!(parse_directive("#3C"), Some(YeStyleDirective::Color(YeColor::gray(0x3C))));
    assert_eq!(parse_directive("#0F0"), Some(YeStyleDirective::Color(YeColor::new(0, 255, 0))));
    assert_eq!(YeColor::new(255, 136, 0).to_hex(), "#FF8800");
}

#[test]
fn test_position_suffix_priority() {
    assert_eq!(
        parse_directive("12yy"),
        Some(YeStyleDirective::Position(YePosition::Absolute { axis: YeAxis::Y, value: 12.0 }))
    );
    assert_eq!(
        parse_directive("12y"),
        Some(YeStyleDirective::Position(YePosition::Relative { axis: YeAxis::Y, offset: 12.0 }))
    );
}

#[test]
fn test_rotation_requires_degree_sign() {
    assert_eq!(parse_directive("-15º"), Some(YeStyleDirective::Rotation(-15.0)));
    assert_eq!(parse_directive("30"), None);
}

#[test]
fn test_dimension_forms() {
    assert_eq!(parse_directive("64s"), Some(YeStyleDirective::Dimension(YeDimension::Size(64.0))));
    assert_eq!(parse_directive("1.5w"), Some(YeStyleDirective::Dimension(YeDimension::Width(1.5))));
}

#[test]
fn test_merge_and_strip_helpers() {
    let mut base = parse_style("#F00, font-size:12").unwrap();
    let overlay = parse_style("50%, #00F").unwrap();
    base.merge(&overlay);

    assert_eq!(base.color, Some(YeColor::new(0, 0, 255)));
    assert_eq!(base.opacity, Some(0.5));
    assert_eq!(base.font_size, Some(12.0));

    let stripped = base.without_text_metrics();
    assert!(!stripped.has_text_metrics());
    assert!(!stripped.is_empty());
    assert!(parse_style("font-size:12").unwrap().without_text_metrics().is_empty());
}
