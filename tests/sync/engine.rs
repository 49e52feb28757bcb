//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd Team.

#[path = "../common/mod.rs"]
mod common;

use common::MemoryHost;
use ye::{
    YeColor, YeComponentInfo, YeError, YeLayerKind, YeNodeId, YeProgress, YeSheetData,
    YeSyncConfig, YeSyncEngine, YeWorksheet,
};

fn people() -> YeSheetData {
    YeSheetData::new(vec![
        YeWorksheet::from_columns(
            "People",
            vec![
                ("Name", vec!["Ann", "Bo", "Cy"]),
                ("Color", vec!["#F00", "#0F0", "blue-ish"]),
                ("Style", vec!["#F00, 50%", "hide", "font-size:14"]),
                ("Photo", vec!["https://cdn.example.com/ann.png", "", ""]),
                ("Icon", vec!["star_icon", "State=Hover", "Unknown"]),
            ],
        ),
        YeWorksheet::from_columns("Staff", vec![("Name", vec!["Dee", "Eve"])]),
    ])
}

fn engine() -> YeSyncEngine {
    YeSyncEngine::new(YeSyncConfig::builder().random_seed(11).build())
}

fn scope(host: &MemoryHost) -> Vec<YeNodeId> {
    host.roots.clone()
}

#[tokio::test]
async fn test_sequential_layers_walk_down_rows() {
    let mut host = MemoryHost::new();
    host.add(None, "page", "Page", YeLayerKind::Frame);
    host.add(Some("page"), "a", "#Name.n", YeLayerKind::Text);
    host.add(Some("page"), "b", "#Name.n", YeLayerKind::Text);

    let sheet = YeSheetData::single(YeWorksheet::from_columns("S", vec![("Name", vec!["Ann", "Bo"])]));
    let roots = scope(&host);
    let result = engine().run(&mut host, &sheet, &roots).await;

    assert_eq!(host.text("a"), Some("Ann"));
    assert_eq!(host.text("b"), Some("Bo"));
    assert!(result.success);
    assert_eq!((result.layers_processed, result.layers_updated), (2, 2));
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_repeat_container_is_expanded_before_resolution() {
    let mut host = MemoryHost::new();
    host.add(None, "list", "Cards @#", YeLayerKind::Frame);
    host.add(Some("list"), "card", "Card", YeLayerKind::Frame);
    host.add(Some("card"), "name", "#Name", YeLayerKind::Text);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.child_ids("list").len(), 3);
    assert_eq!(host.texts(), vec!["Ann", "Bo", "Cy"]);
    assert_eq!(result.layers_updated, 3);
}

#[tokio::test]
async fn test_nested_repeats_expand_inside_clones() {
    let mut host = MemoryHost::new();
    host.add(None, "outer", "Groups @# // Staff", YeLayerKind::Frame);
    host.add(Some("outer"), "group", "Group", YeLayerKind::Frame);
    host.add(Some("group"), "inner", "Rows @#", YeLayerKind::Frame);
    host.add(Some("inner"), "row", "#Name", YeLayerKind::Text);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.child_ids("outer").len(), 2);
    for group in host.child_ids("outer") {
        let inner = host.nodes[&group].children[0].clone();
        assert_eq!(host.nodes[&inner].children.len(), 2);
    }
    assert_eq!(result.layers_processed, 4);
    assert!(result.errors.is_empty());
}

#[tokio::test]
async fn test_zero_row_repeat_is_left_untouched() {
    let mut host = MemoryHost::new();
    host.add(None, "list", "Cards @#", YeLayerKind::Frame);
    host.add(Some("list"), "card", "Card", YeLayerKind::Frame);
    host.add(Some("card"), "name", "#Name", YeLayerKind::Text);

    let sheet = YeSheetData::single(YeWorksheet::from_columns("S", vec![("Name", Vec::<String>::new())]));
    let roots = scope(&host);
    let result = engine().run(&mut host, &sheet, &roots).await;

    assert_eq!(host.child_ids("list").len(), 1);
    assert!(result.warnings.iter().any(|w| w.contains("no rows")));
    assert!(matches!(result.errors[0].error, YeError::EmptyValues { .. }));
}

#[tokio::test]
async fn test_partial_success_and_hard_failure() {
    let mut host = MemoryHost::new();
    host.add(None, "ok", "#Name", YeLayerKind::Text);
    host.add(None, "bad", "#Missing", YeLayerKind::Text);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;
    assert!(result.success);
    assert!(result.is_partial());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].layer_id, YeNodeId::new("bad"));
    assert_eq!(result.errors[0].layer_name, "#Missing");

    let mut host = MemoryHost::new();
    host.add(None, "bad", "#Missing", YeLayerKind::Text);
    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;
    assert!(!result.success);
    assert_eq!(result.layers_updated, 0);
}

#[tokio::test]
async fn test_recoverable_capability_failure_is_isolated() {
    let mut host = MemoryHost::new();
    host.add(None, "first", "#Name", YeLayerKind::Text);
    host.add(None, "second", "#Name.1", YeLayerKind::Text);
    host.fail_text_on.insert("#Name".to_string());

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(result.errors.len(), 1);
    assert!(!result.aborted);
    assert_eq!(host.text("second"), Some("Ann"));
    assert!(result.success);
}

#[tokio::test]
async fn test_fatal_capability_failure_aborts_run() {
    let mut host = MemoryHost::new();
    host.add(None, "first", "#Name", YeLayerKind::Text);
    host.add(None, "second", "#Name.1", YeLayerKind::Text);
    host.add(None, "third", "#Name.2", YeLayerKind::Text);
    host.fatal_text_on.insert("#Name.1".to_string());

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert!(result.aborted);
    assert!(!result.success);
    assert_eq!(result.layers_processed, 2);
    assert_eq!(host.text("third"), None);
    assert!(matches!(result.errors[0].error, YeError::Capability { recoverable: false, .. }));
}

#[tokio::test]
async fn test_inherited_worksheet_and_index() {
    let mut host = MemoryHost::new();
    host.add(None, "card", "Card // Staff.2", YeLayerKind::Frame);
    host.add(Some("card"), "name", "#Name", YeLayerKind::Text);

    let roots = scope(&host);
    engine().run(&mut host, &people(), &roots).await;
    assert_eq!(host.text("name"), Some("Eve"));
}

#[tokio::test]
async fn test_hidden_ignored_and_main_component_layers_are_skipped() {
    let mut host = MemoryHost::new();
    host.add(None, "page", "Page", YeLayerKind::Frame);
    host.add(Some("page"), "hidden", "#Name", YeLayerKind::Text);
    host.hide("hidden");
    host.add(Some("page"), "forced", "+#Name.1", YeLayerKind::Text);
    host.hide("forced");
    host.add(Some("page"), "hidden_group", "+Group", YeLayerKind::Group);
    host.hide("hidden_group");
    host.add(Some("hidden_group"), "inside", "#Name.2", YeLayerKind::Text);
    host.hide("inside");
    host.add(Some("page"), "skip", "-Draft", YeLayerKind::Frame);
    host.add(Some("skip"), "draft_name", "#Name", YeLayerKind::Text);
    host.add(Some("page"), "main", "Main", YeLayerKind::Component);
    host.add(Some("main"), "main_name", "#Name", YeLayerKind::Text);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.text("hidden"), None);
    assert_eq!(host.text("forced"), Some("Ann"));
    assert_eq!(host.text("inside"), Some("Bo"));
    assert_eq!(host.text("draft_name"), None);
    assert_eq!(host.text("main_name"), None);
    assert_eq!(result.layers_processed, 2);

    let mut host_all = MemoryHost::new();
    host_all.add(None, "hidden", "#Name", YeLayerKind::Text);
    host_all.hide("hidden");
    let roots = scope(&host_all);
    let config = YeSyncConfig::builder().include_hidden(true).build();
    YeSyncEngine::new(config).run(&mut host_all, &people(), &roots).await;
    assert_eq!(host_all.text("hidden"), Some("Ann"));
}

#[tokio::test]
async fn test_resource_values_are_deferred() {
    let mut host = MemoryHost::new();
    host.add(None, "photo", "#Photo.1", YeLayerKind::Shape);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(result.pending_deferred.len(), 1);
    assert_eq!(result.pending_deferred[0].url, "https://cdn.example.com/ann.png");
    assert_eq!(result.pending_deferred[0].layer_id, YeNodeId::new("photo"));
    assert_eq!(result.layers_updated, 0);
    assert!(result.errors.is_empty());
    assert!(result.success);
}

#[tokio::test]
async fn test_instances_swap_by_name_and_variant() {
    let mut host = MemoryHost::new();
    host.components = vec![
        YeComponentInfo {
            id: YeNodeId::new("star"),
            name: "Star Icon".to_string(),
            set_name: None,
            properties: Vec::new(),
        },
        YeComponentInfo {
            id: YeNodeId::new("default"),
            name: "State=Default".to_string(),
            set_name: Some("Toggle".to_string()),
            properties: vec![("State".to_string(), "Default".to_string())],
        },
        YeComponentInfo {
            id: YeNodeId::new("hover"),
            name: "State=Hover".to_string(),
            set_name: Some("Toggle".to_string()),
            properties: vec![("State".to_string(), "Hover".to_string())],
        },
    ];
    host.add(None, "by_name", "#Icon.1", YeLayerKind::Instance);
    host.add(None, "by_variant", "#Icon.2", YeLayerKind::Instance);
    host.node_mut("by_variant").component = Some(YeNodeId::new("default"));
    host.add(None, "unknown", "#Icon.3", YeLayerKind::Instance);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.node("by_name").component, Some(YeNodeId::new("star")));
    assert_eq!(host.node("by_variant").component, Some(YeNodeId::new("hover")));
    assert_eq!(host.swaps.len(), 2);
    assert_eq!(result.layers_updated, 2);
    assert!(result.warnings.iter().any(|w| w.contains("Unknown")));
}

#[tokio::test]
async fn test_chained_value_on_text_layer_is_styled() {
    let mut host = MemoryHost::new();
    host.add(None, "label", "#Style.1", YeLayerKind::Text);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.text("label"), None);
    assert_eq!(host.styles.len(), 1);
    assert_eq!(host.styles[0].1.color, Some(YeColor::new(255, 0, 0)));
    assert_eq!(host.styles[0].1.opacity, Some(0.5));
    assert_eq!(result.layers_updated, 1);
}

#[tokio::test]
async fn test_prose_on_text_layers_stays_text() {
    let mut host = MemoryHost::new();
    host.add(None, "a", "#Blurb.1", YeLayerKind::Text);
    host.add(None, "b", "#Blurb.2", YeLayerKind::Text);

    let sheet = YeSheetData::single(YeWorksheet::from_columns(
        "S",
        vec![("Blurb", vec!["Ranked #1 of #5 teams", "Show 50% off today"])],
    ));
    let roots = scope(&host);
    let result = engine().run(&mut host, &sheet, &roots).await;

    assert_eq!(host.text("a"), Some("Ranked #1 of #5 teams"));
    assert_eq!(host.text("b"), Some("Show 50% off today"));
    assert!(host.styles.is_empty());
    assert_eq!(result.layers_updated, 2);
}

#[tokio::test]
async fn test_failed_secondary_style_keeps_text_update() {
    let mut host = MemoryHost::new();
    host.add(None, "first", "#Name #Color.1", YeLayerKind::Text);
    host.add(None, "second", "#Name #Color.2", YeLayerKind::Text);
    host.fail_style_on.insert("#Name #Color.1".to_string());
    host.fail_style_on.insert("#Name #Color.2".to_string());

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.text("first"), Some("Ann"));
    assert_eq!(host.text("second"), Some("Bo"));
    assert_eq!(result.layers_updated, 2);
    assert_eq!(result.errors.len(), 2);
    assert!(matches!(result.errors[0].error, YeError::Capability { recoverable: true, .. }));
    assert!(result.success);
    assert!(result.is_partial());
}

#[tokio::test]
async fn test_secondary_labels_feed_styles() {
    let mut host = MemoryHost::new();
    host.add(None, "first", "#Name #Color.1", YeLayerKind::Text);
    host.add(None, "third", "#Name #Color.3", YeLayerKind::Text);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.text("first"), Some("Ann"));
    assert_eq!(host.styles.len(), 1);
    assert_eq!(host.styles[0].0, YeNodeId::new("first"));
    assert_eq!(host.styles[0].1.color, Some(YeColor::new(255, 0, 0)));
    assert_eq!(host.text("third"), Some("Cy"));
    assert!(result.warnings.iter().any(|w| w.contains("blue-ish")));
}

#[tokio::test]
async fn test_text_metrics_are_dropped_on_shapes() {
    let mut host = MemoryHost::new();
    host.add(None, "box", "#Style.3", YeLayerKind::Shape);
    host.add(None, "group", "#Color.1", YeLayerKind::Group);

    let roots = scope(&host);
    let result = engine().run(&mut host, &people(), &roots).await;

    assert_eq!(host.styles.len(), 1);
    assert_eq!(host.styles[0].0, YeNodeId::new("group"));
    assert!(result.warnings.iter().any(|w| w.contains("text metrics ignored")));
    assert!(result.warnings.iter().any(|w| w.contains("groups have no fill")));
    assert_eq!(result.layers_updated, 1);
}

#[tokio::test]
async fn test_progress_is_reported_per_layer() {
    let mut host = MemoryHost::new();
    for i in 0..4 {
        host.add(None, &format!("n{}", i), "#Name", YeLayerKind::Text);
    }
    let config = YeSyncConfig::builder().progress_every(2).build();
    let mut reports: Vec<YeProgress> = Vec::new();

    let roots = scope(&host);
    YeSyncEngine::new(config)
        .run_with_progress(&mut host, &people(), &roots, |p| reports.push(p.clone()))
        .await;

    let layer_reports: Vec<usize> = reports
        .iter()
        .filter(|p| p.message.starts_with("Synced"))
        .map(|p| p.processed)
        .collect();
    assert_eq!(layer_reports, vec![2, 4]);
    assert_eq!(reports[0].message, "Prepared component lookup");
    assert_eq!(reports[0].percent, 0.0);
    assert!(reports
        .iter()
        .filter(|p| p.message.starts_with("Expanded"))
        .all(|p| p.percent == 0.0));
    assert_eq!(reports.last().map(|p| p.percent), Some(100.0));
}

#[test]
fn test_run_blocking() {
    let mut host = MemoryHost::new();
    host.add(None, "a", "#Name.3", YeLayerKind::Text);
    let roots = scope(&host);
    let result = engine().run_blocking(&mut host, &people(), &roots);
    assert!(result.success);
    assert_eq!(host.text("a"), Some("Cy"));
}
