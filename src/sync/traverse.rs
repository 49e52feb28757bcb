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

//! Depth-first enumeration of the layers a sync run may touch.
//!
//! Each visited layer carries its descriptor with worksheet and index already
//! inherited from its ancestors. Visits come out in pre-order, so the
//! descendants of the visit at position `i` are the visits that follow it
//! with a greater depth.

use crate::capability::{YeLayerInfo, YeNodeId, YeSceneGraph};
use crate::config::YeSyncConfig;
use crate::dsl::inherit::resolve_inherited;
use crate::dsl::ir::YeBindingDescriptor;
use crate::dsl::parser::YeLabelParser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YeTraversalPolicy {
    pub include_hidden: bool,
    pub skip_main_components: bool,
}

impl From<&YeSyncConfig> for YeTraversalPolicy {
    fn from(config: &YeSyncConfig) -> Self {
        Self {
            include_hidden: config.include_hidden,
            skip_main_components: config.skip_main_components,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct YeVisitedLayer {
    pub info: YeLayerInfo,
    pub parent: Option<YeNodeId>,
    pub depth: usize,
    pub descriptor: YeBindingDescriptor,
}

/// Walks every root and its subtree.
///
/// Ignored (`-`) subtrees are never entered. Hidden subtrees are skipped
/// unless the policy includes them or a `+` on the layer or an ancestor
/// forces them. Main components below a root are skipped when the policy
/// says so.
pub fn enumerate_layers<G: YeSceneGraph + ?Sized>(
    graph: &G,
    roots: &[YeNodeId],
    policy: YeTraversalPolicy,
) -> Vec<YeVisitedLayer> {
    let parser = YeLabelParser::new();
    let mut visits = Vec::new();
    let mut ancestors = Vec::new();
    for root in roots {
        visit(graph, &parser, policy, root, None, 0, false, &mut ancestors, &mut visits);
    }
    visits
}

#[allow(clippy::too_many_arguments)]
fn visit<G: YeSceneGraph + ?Sized>(
    graph: &G,
    parser: &YeLabelParser,
    policy: YeTraversalPolicy,
    id: &YeNodeId,
    parent: Option<&YeNodeId>,
    depth: usize,
    forced: bool,
    ancestors: &mut Vec<YeBindingDescriptor>,
    visits: &mut Vec<YeVisitedLayer>,
) {
    let Some(info) = graph.layer(id) else {
        log::debug!("sync.traverse.missing: layer vanished - id={}", id);
        return;
    };

    let raw = parser.parse(&info.name);
    if raw.is_ignored {
        return;
    }

    let forced = forced || raw.force_include;
    if !info.visible && !policy.include_hidden && !forced {
        log::debug!("sync.traverse.hidden: skipping hidden subtree - layer={}", info.name);
        return;
    }
    if depth > 0 && policy.skip_main_components && info.kind.is_main_component() {
        log::debug!("sync.traverse.component: skipping main component - layer={}", info.name);
        return;
    }

    let descriptor = resolve_inherited(&raw, ancestors.iter().rev());
    let children = graph.children(id);
    visits.push(YeVisitedLayer {
        info,
        parent: parent.cloned(),
        depth,
        descriptor,
    });

    ancestors.push(raw);
    for child in &children {
        visit(graph, parser, policy, child, Some(id), depth + 1, forced, ancestors, visits);
    }
    ancestors.pop();
}

/// The visits nested under `visits[position]`.
pub fn descendants(visits: &[YeVisitedLayer], position: usize) -> &[YeVisitedLayer] {
    let Some(root) = visits.get(position) else {
        return &[];
    };
    let rest = &visits[position + 1..];
    let end = rest
        .iter()
        .position(|v| v.depth <= root.depth)
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Visits whose descriptor names at least one label.
pub fn bound_layers(visits: &[YeVisitedLayer]) -> impl Iterator<Item = &YeVisitedLayer> {
    visits.iter().filter(|v| v.descriptor.has_binding)
}
