//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd Team.

#[path = "../common/mod.rs"]
mod common;

use common::MemoryHost;
use ye::sync::{enumerate_layers, expand_container, repeat_count, repeat_source, YeTraversalPolicy};
use ye::{YeError, YeLayerKind, YeNodeId, YeSheetData, YeSyncConfig, YeWorksheet};

fn list_with_children(count: usize) -> MemoryHost {
    let mut host = MemoryHost::new();
    host.add(None, "list", "List @#", YeLayerKind::Frame);
    for i in 0..count {
        let card = format!("card{}", i);
        host.add(Some("list"), &card, "Card", YeLayerKind::Frame);
        host.add(Some(&card), &format!("name{}", i), "#Name", YeLayerKind::Text);
    }
    host
}

#[test]
fn test_grow_clones_template_with_subtree() {
    let mut host = list_with_children(1);
    let outcome = expand_container(&mut host, &YeNodeId::new("list"), 4).unwrap();

    assert_eq!((outcome.before, outcome.after), (1, 4));
    let children = host.child_ids("list");
    assert_eq!(children.len(), 4);
    assert_eq!(children[0], YeNodeId::new("card0"));
    for clone in &children[1..] {
        let node = &host.nodes[clone];
        assert_eq!(node.name, "Card");
        assert_eq!(node.children.len(), 1);
    }
}

#[test]
fn test_failed_clone_rolls_back_every_duplicate() {
    let mut host = list_with_children(1);
    let nodes_before = host.nodes.len();
    host.fail_clone_at = Some(3);

    let err = expand_container(&mut host, &YeNodeId::new("list"), 6).unwrap_err();

    assert!(matches!(err, YeError::RepeatExpansion { .. }));
    assert_eq!(host.child_ids("list"), vec![YeNodeId::new("card0")]);
    assert_eq!(host.nodes.len(), nodes_before);
}

#[test]
fn test_shrink_destroys_surplus_children() {
    let mut host = list_with_children(5);
    let outcome = expand_container(&mut host, &YeNodeId::new("list"), 2).unwrap();

    assert_eq!((outcome.before, outcome.after), (5, 2));
    assert_eq!(
        host.child_ids("list"),
        vec![YeNodeId::new("card0"), YeNodeId::new("card1")]
    );
    assert!(!host.nodes.contains_key(&YeNodeId::new("card4")));
    assert!(!host.nodes.contains_key(&YeNodeId::new("name4")));
}

#[test]
fn test_failed_removal_restores_original_order() {
    let mut host = list_with_children(5);
    let original = host.child_ids("list");
    host.fail_remove_at = Some(3);

    let err = expand_container(&mut host, &YeNodeId::new("list"), 1).unwrap_err();

    assert!(matches!(err, YeError::RepeatExpansion { .. }));
    assert_eq!(host.child_ids("list"), original);
}

#[test]
fn test_matching_count_is_a_no_op() {
    let mut host = list_with_children(3);
    let original = host.child_ids("list");
    expand_container(&mut host, &YeNodeId::new("list"), 3).unwrap();
    assert_eq!(host.child_ids("list"), original);
}

#[test]
fn test_empty_container_and_zero_target_are_rejected() {
    let mut host = MemoryHost::new();
    host.add(None, "list", "List @#", YeLayerKind::Frame);
    assert!(expand_container(&mut host, &YeNodeId::new("list"), 2).is_err());

    let mut host = list_with_children(2);
    assert!(expand_container(&mut host, &YeNodeId::new("list"), 0).is_err());
    assert_eq!(host.child_ids("list").len(), 2);
}

#[test]
fn test_repeat_source_uses_first_descendant_label() {
    let mut host = MemoryHost::new();
    host.add(None, "list", "List @# // Staff", YeLayerKind::Frame);
    host.add(Some("list"), "card", "Card", YeLayerKind::Frame);
    host.add(Some("card"), "role", "#Role", YeLayerKind::Text);
    host.add(Some("card"), "name", "#Name", YeLayerKind::Text);

    let policy = YeTraversalPolicy::from(&YeSyncConfig::default());
    let visits = enumerate_layers(&host, &host.roots.clone(), policy);
    let source = repeat_source(&visits, 0).unwrap();
    assert_eq!(source.label, "Role");
    assert_eq!(source.worksheet.as_deref(), Some("Staff"));

    let sheet = YeSheetData::new(vec![
        YeWorksheet::from_columns("People", vec![("Role", vec!["a"])]),
        YeWorksheet::from_columns("Staff", vec![("Role", vec!["x", "y", "z"])]),
    ]);
    assert_eq!(repeat_count(&sheet, &source).unwrap(), 3);
}
