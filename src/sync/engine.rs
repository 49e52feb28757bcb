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

//! # Sync Engine
//!
//! Runs one sync pass over a host document in five sequential phases:
//!
//! 1. **Preparation**: index the host's main components for swapping
//! 2. **Repeat expansion**: resize every repeat container to its row count
//! 3. **Enumeration**: walk the scope again so clones from phase 2 are seen
//! 4. **Resolution**: resolve and dispatch every bound layer in order
//! 5. **Aggregation**: apply the partial-success policy
//!
//! Each phase completes before the next starts. Layers are resolved one at a
//! time in enumeration order, which is what makes `Increment` bindings walk
//! down the rows predictably.

use std::collections::HashSet;

use crate::capability::{YeHost, YeNodeId, YeResourceTest, YeUrlResourceTest};
use crate::component::YeComponentIndex;
use crate::config::YeSyncConfig;
use crate::errors::{Result, YeError};
use crate::sheet::worksheet::YeSheetData;
use crate::sync::repeat::{expand_container, repeat_count, repeat_source};
use crate::sync::report::{YeDeferredRequest, YeLayerError, YeProgress, YeSyncRunResult};
use crate::sync::traverse::{bound_layers, enumerate_layers, YeTraversalPolicy, YeVisitedLayer};
use crate::tracker::YeIndexTracker;
use crate::value::chained::{parse_chained_exact, parse_style, YeChainedValue};

/// What happened to one layer.
///
/// A layer can be updated and still carry a failure, e.g. when its text was
/// written but the secondary style could not be applied.
#[derive(Debug, Default)]
struct YeLayerOutcome {
    updated: bool,
    failure: Option<YeError>,
}

impl YeLayerOutcome {
    fn done(updated: bool) -> Self {
        Self { updated, failure: None }
    }

    fn failed(updated: bool, error: YeError) -> Self {
        Self {
            updated,
            failure: Some(error),
        }
    }
}

/// Orchestrates sync runs with one configuration.
pub struct YeSyncEngine {
    config: YeSyncConfig,
    resource_test: Box<dyn YeResourceTest>,
}

impl Default for YeSyncEngine {
    fn default() -> Self {
        Self::new(YeSyncConfig::default())
    }
}

impl std::fmt::Debug for YeSyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YeSyncEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl YeSyncEngine {
    pub fn new(config: YeSyncConfig) -> Self {
        Self {
            config,
            resource_test: Box::new(YeUrlResourceTest),
        }
    }

    /// Replaces the default `http(s)://` resource test.
    pub fn with_resource_test(mut self, test: impl YeResourceTest + 'static) -> Self {
        self.resource_test = Box::new(test);
        self
    }

    pub fn config(&self) -> &YeSyncConfig {
        &self.config
    }

    /// Runs a full pass with a fresh tracker and no progress reporting.
    pub async fn run<H: YeHost + ?Sized>(
        &self,
        host: &mut H,
        sheet: &YeSheetData,
        scope: &[YeNodeId],
    ) -> YeSyncRunResult {
        let mut tracker = YeIndexTracker::from_seed(self.config.random_seed);
        self.run_with(host, sheet, scope, &mut tracker, |_| {}).await
    }

    /// Runs a full pass, reporting progress to `progress`.
    pub async fn run_with_progress<H, F>(
        &self,
        host: &mut H,
        sheet: &YeSheetData,
        scope: &[YeNodeId],
        progress: F,
    ) -> YeSyncRunResult
    where
        H: YeHost + ?Sized,
        F: FnMut(&YeProgress),
    {
        let mut tracker = YeIndexTracker::from_seed(self.config.random_seed);
        self.run_with(host, sheet, scope, &mut tracker, progress).await
    }

    /// Blocks the current thread on [`YeSyncEngine::run`].
    pub fn run_blocking<H: YeHost + ?Sized>(
        &self,
        host: &mut H,
        sheet: &YeSheetData,
        scope: &[YeNodeId],
    ) -> YeSyncRunResult {
        futures::executor::block_on(self.run(host, sheet, scope))
    }

    /// Runs a full pass with a caller-owned tracker.
    ///
    /// The tracker is used as is; reset it first when reusing it.
    pub async fn run_with<H, F>(
        &self,
        host: &mut H,
        sheet: &YeSheetData,
        scope: &[YeNodeId],
        tracker: &mut YeIndexTracker,
        mut progress: F,
    ) -> YeSyncRunResult
    where
        H: YeHost + ?Sized,
        F: FnMut(&YeProgress),
    {
        let mut result = YeSyncRunResult::default();
        let policy = YeTraversalPolicy::from(&self.config);

        log::info!("sync.phase.start: starting phase - phase=preparation");
        let components = if self.config.swap_components {
            YeComponentIndex::new(host.components())
        } else {
            YeComponentIndex::default()
        };
        log::debug!("sync.components.indexed: component lookup built - count={}", components.len());
        progress(&YeProgress::phase("Prepared component lookup"));

        if self.config.expand_repeats {
            log::info!("sync.phase.start: starting phase - phase=repeat_expansion");
            self.expand_repeats(host, sheet, scope, policy, &mut result);
            progress(&YeProgress::phase("Expanded repeat containers"));
        }

        log::info!("sync.phase.start: starting phase - phase=enumeration");
        let visits = enumerate_layers(&*host, scope, policy);
        let bound: Vec<&YeVisitedLayer> = bound_layers(&visits).collect();
        let total = bound.len();
        progress(&YeProgress::new(format!("Found {} bound layers", total), 0, total));

        log::info!("sync.phase.start: starting phase - phase=resolution - layers={}", total);
        for (position, visit) in bound.iter().enumerate() {
            result.layers_processed += 1;
            let outcome = self
                .sync_layer(host, sheet, tracker, &components, visit, &mut result)
                .await;
            if outcome.updated {
                result.layers_updated += 1;
            }
            if let Some(err) = outcome.failure {
                let recoverable = err.is_recoverable();
                if recoverable {
                    log::warn!(
                        "sync.layer.failed: layer failed - layer={}, id={}, updated={}, error={}",
                        visit.info.name,
                        visit.info.id,
                        outcome.updated,
                        err
                    );
                } else {
                    log::error!(
                        "sync.run.aborted: non-recoverable failure - layer={}, id={}, error={}",
                        visit.info.name,
                        visit.info.id,
                        err
                    );
                }
                result.errors.push(YeLayerError::new(&visit.info, err));
                if !recoverable {
                    result.aborted = true;
                    break;
                }
            }

            let processed = position + 1;
            if processed % self.config.progress_every.max(1) == 0 || processed == total {
                progress(&YeProgress::new(
                    format!("Synced {} of {} layers", processed, total),
                    processed,
                    total,
                ));
            }
        }

        result.finalize();
        log::info!("sync.run.finished: run complete - {}", result.summary());
        progress(&YeProgress::new(
            "Sync complete",
            result.layers_processed,
            total.max(result.layers_processed),
        ));
        result
    }

    /// Expands containers in pre-order, re-walking after each one so that
    /// repeat containers inside fresh clones are expanded too.
    fn expand_repeats<H: YeHost + ?Sized>(
        &self,
        host: &mut H,
        sheet: &YeSheetData,
        scope: &[YeNodeId],
        policy: YeTraversalPolicy,
        result: &mut YeSyncRunResult,
    ) {
        let mut handled: HashSet<YeNodeId> = HashSet::new();

        loop {
            let visits = enumerate_layers(&*host, scope, policy);
            let Some(position) = visits.iter().position(|v| {
                v.descriptor.is_repeat_container && !handled.contains(&v.info.id)
            }) else {
                break;
            };
            let container = &visits[position];
            handled.insert(container.info.id.clone());

            let Some(source) = repeat_source(&visits, position) else {
                result.warnings.push(format!(
                    "Repeat container '{}' has no bound descendant; left unchanged",
                    container.info.name
                ));
                continue;
            };

            let count = match repeat_count(sheet, &source) {
                Ok(count) => count,
                Err(err) => {
                    log::warn!(
                        "sync.repeat.source: row count unavailable - container={}, label={}, error={}",
                        container.info.name,
                        source.label,
                        err
                    );
                    result.errors.push(YeLayerError::new(&container.info, err));
                    continue;
                }
            };

            if count == 0 {
                result.warnings.push(format!(
                    "Repeat container '{}': label '{}' has no rows; left unchanged",
                    container.info.name, source.label
                ));
                continue;
            }

            if let Err(err) = expand_container(host, &container.info.id, count) {
                result.errors.push(YeLayerError::new(&container.info, err));
            }
        }
    }

    /// Resolves and dispatches one layer, then applies its secondary style.
    async fn sync_layer<H: YeHost + ?Sized>(
        &self,
        host: &mut H,
        sheet: &YeSheetData,
        tracker: &mut YeIndexTracker,
        components: &YeComponentIndex,
        visit: &YeVisitedLayer,
        result: &mut YeSyncRunResult,
    ) -> YeLayerOutcome {
        let updated = match self
            .sync_primary(host, sheet, tracker, components, visit, result)
            .await
        {
            Ok(updated) => updated,
            Err(err) => return YeLayerOutcome::failed(false, err),
        };

        let style = self.secondary_style(sheet, tracker, visit, result);
        if style.is_empty() {
            return YeLayerOutcome::done(updated);
        }
        match self.apply_style(host, visit, &style, result).await {
            Ok(styled) => YeLayerOutcome::done(updated || styled),
            Err(err) => YeLayerOutcome::failed(updated, err),
        }
    }

    /// `Ok(true)` means the primary value changed the layer.
    async fn sync_primary<H: YeHost + ?Sized>(
        &self,
        host: &mut H,
        sheet: &YeSheetData,
        tracker: &mut YeIndexTracker,
        components: &YeComponentIndex,
        visit: &YeVisitedLayer,
        result: &mut YeSyncRunResult,
    ) -> Result<bool> {
        let descriptor = &visit.descriptor;
        let Some(label) = descriptor.primary_label() else {
            return Ok(false);
        };
        let directive = descriptor.directive_or(self.config.default_directive);

        let primary = tracker.resolve(sheet, label, descriptor.worksheet.as_deref(), directive)?;
        log::debug!(
            "sync.layer.resolved: value selected - layer={}, label={}, index={}",
            visit.info.name,
            primary.label,
            primary.index
        );

        self.dispatch_primary(host, components, visit, &primary.value, result)
            .await
    }

    /// Folds the style values of the secondary labels, in label order.
    fn secondary_style(
        &self,
        sheet: &YeSheetData,
        tracker: &mut YeIndexTracker,
        visit: &YeVisitedLayer,
        result: &mut YeSyncRunResult,
    ) -> YeChainedValue {
        let descriptor = &visit.descriptor;
        let directive = descriptor.directive_or(self.config.default_directive);
        let worksheet = descriptor.worksheet.as_deref();

        let mut style = YeChainedValue::default();
        for secondary in descriptor.secondary_labels() {
            match tracker.resolve(sheet, secondary, worksheet, directive) {
                Ok(resolved) => match parse_style(&resolved.value) {
                    Some(parsed) => style.merge(&parsed),
                    None => result.warnings.push(format!(
                        "Layer '{}': value '{}' of label '{}' is not a style directive",
                        visit.info.name, resolved.value, secondary
                    )),
                },
                Err(err) => result.warnings.push(format!(
                    "Layer '{}': secondary label skipped: {}",
                    visit.info.name, err
                )),
            }
        }
        style
    }

    async fn dispatch_primary<H: YeHost + ?Sized>(
        &self,
        host: &mut H,
        components: &YeComponentIndex,
        visit: &YeVisitedLayer,
        value: &str,
        result: &mut YeSyncRunResult,
    ) -> Result<bool> {
        let layer = &visit.info;

        if self.resource_test.is_resource_reference(value) {
            result.pending_deferred.push(YeDeferredRequest {
                layer_id: layer.id.clone(),
                layer_name: layer.name.clone(),
                url: value.trim().to_string(),
            });
            return Ok(false);
        }

        if layer.kind.is_text() {
            if let Some(chained) = parse_chained_exact(value) {
                return self.apply_style(host, visit, &chained, result).await;
            }
            host.set_text(&layer.id, value).await?;
            return Ok(true);
        }

        if layer.kind.is_instance() && self.config.swap_components {
            let current = host.instance_component(&layer.id);
            if let Some(target) = components.resolve(value, current.as_ref()) {
                let target = target.clone();
                host.swap_component(&layer.id, &target).await?;
                log::debug!(
                    "sync.layer.swapped: instance swapped - layer={}, component={}",
                    layer.name,
                    target.name
                );
                return Ok(true);
            }
        }

        if let Some(style) = parse_style(value) {
            return self.apply_style(host, visit, &style, result).await;
        }

        result.warnings.push(format!(
            "Layer '{}': value '{}' cannot be applied to a {:?} layer",
            layer.name, value, layer.kind
        ));
        Ok(false)
    }

    /// Text metrics are dropped with a warning on non-text layers.
    async fn apply_style<H: YeHost + ?Sized>(
        &self,
        host: &mut H,
        visit: &YeVisitedLayer,
        style: &YeChainedValue,
        result: &mut YeSyncRunResult,
    ) -> Result<bool> {
        let layer = &visit.info;
        let mut style = style.clone();
        if style.has_text_metrics() && !layer.kind.is_text() {
            log::warn!(
                "sync.style.text_metrics: ignoring text metrics on non-text layer - layer={}",
                layer.name
            );
            result.warnings.push(format!(
                "Layer '{}': text metrics ignored on a non-text layer",
                layer.name
            ));
            style = style.without_text_metrics();
        }
        if style.is_empty() {
            return Ok(false);
        }

        let warnings = host.apply_style(&layer.id, &style).await?;
        result
            .warnings
            .extend(warnings.into_iter().map(|w| format!("Layer '{}': {}", layer.name, w)));
        Ok(true)
    }
}
