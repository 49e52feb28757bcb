//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd Team.

use proptest::prelude::*;
use ye::{parse_layer_name, YeIndexDirective};

#[test]
fn test_parse_single_label() {
    let descriptor = parse_layer_name("#Title");
    assert!(descriptor.has_binding);
    assert_eq!(descriptor.labels, vec!["Title"]);
    assert_eq!(descriptor.index, None);
    assert_eq!(descriptor.worksheet, None);
}

#[test]
fn test_parse_multiple_labels_with_specific_index() {
    let descriptor = parse_layer_name("#a #b.3");
    assert_eq!(descriptor.labels, vec!["a", "b"]);
    assert_eq!(descriptor.index, Some(YeIndexDirective::Specific(3)));
    assert_eq!(descriptor.primary_label(), Some("a"));
    assert_eq!(descriptor.secondary_labels(), &["b".to_string()]);
}

#[test]
fn test_parse_index_suffixes_are_case_insensitive() {
    let cases = [
        ("#Name.n", YeIndexDirective::Increment),
        ("#Name.I", YeIndexDirective::IncrementNonBlank),
        ("#Name.x", YeIndexDirective::Random),
        ("#Name.R", YeIndexDirective::RandomNonBlank),
        ("#Name.12", YeIndexDirective::Specific(12)),
    ];
    for (name, expected) in cases {
        assert_eq!(parse_layer_name(name).index, Some(expected), "{}", name);
    }
}

#[test]
fn test_parse_worksheet_reference() {
    let descriptor = parse_layer_name("// People List #Name.r");
    assert_eq!(descriptor.worksheet.as_deref(), Some("People List"));
    assert_eq!(descriptor.labels, vec!["Name"]);
    assert_eq!(descriptor.index, Some(YeIndexDirective::RandomNonBlank));
}

#[test]
fn test_worksheet_only_name_has_no_binding() {
    let descriptor = parse_layer_name("Cards // Sheet2.2");
    assert!(!descriptor.has_binding);
    assert_eq!(descriptor.worksheet.as_deref(), Some("Sheet2"));
    assert_eq!(descriptor.index, Some(YeIndexDirective::Specific(2)));
}

#[test]
fn test_ignore_prefix_short_circuits() {
    let descriptor = parse_layer_name("-#Title.3 // Sheet");
    assert!(descriptor.is_ignored);
    assert!(!descriptor.has_binding);
    assert!(descriptor.labels.is_empty());
    assert_eq!(descriptor.worksheet, None);
}

#[test]
fn test_force_include_and_repeat_flags() {
    let forced = parse_layer_name("+#Photo");
    assert!(forced.force_include);
    assert_eq!(forced.labels, vec!["Photo"]);

    let repeat = parse_layer_name("Cards @#");
    assert!(repeat.is_repeat_container);
    assert!(!repeat.has_binding);
}

#[test]
fn test_labels_never_contain_whitespace() {
    let descriptor = parse_layer_name("#First Name");
    assert_eq!(descriptor.labels, vec!["First"]);
}

#[test]
fn test_malformed_fragments_are_ignored() {
    let descriptor = parse_layer_name("# #1abc ##");
    assert!(!descriptor.has_binding);
    assert!(descriptor.labels.is_empty());
}

#[test]
fn test_blank_names_yield_empty_descriptor() {
    for name in ["", "   ", "\t\n"] {
        let descriptor = parse_layer_name(name);
        assert!(!descriptor.has_binding);
        assert!(!descriptor.is_ignored);
    }
}

proptest! {
    #[test]
    fn prop_parse_is_total(name in any::<String>()) {
        let descriptor = parse_layer_name(&name);
        prop_assert_eq!(descriptor.has_binding, !descriptor.labels.is_empty());
        for label in &descriptor.labels {
            prop_assert!(!label.chars().any(char::is_whitespace));
        }
    }

    #[test]
    fn prop_ignore_prefix_disables_binding(name in any::<String>()) {
        let descriptor = parse_layer_name(&format!("-{}", name));
        prop_assert!(descriptor.is_ignored);
        prop_assert!(!descriptor.has_binding);
    }
}
