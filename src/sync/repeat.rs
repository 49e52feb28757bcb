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

//! Repeat containers grow or shrink to the number of data rows.
//!
//! Expansion is all-or-nothing per container: when any clone, append or
//! removal fails, every clone made so far is destroyed and every removed
//! child is re-inserted at its original position before the error is
//! returned.

use crate::capability::{YeCapabilityError, YeContainerMutator, YeNodeId, YeSceneGraph};
use crate::errors::{Result, YeError};
use crate::sheet::worksheet::YeSheetData;
use crate::sync::traverse::{descendants, YeVisitedLayer};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YeRepeatOutcome {
    pub container: YeNodeId,
    pub before: usize,
    pub after: usize,
}

/// Where the row count of a repeat container comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YeRepeatSource {
    pub label: String,
    pub worksheet: Option<String>,
}

/// First label referenced below the container at `visits[position]`.
pub fn repeat_source(visits: &[YeVisitedLayer], position: usize) -> Option<YeRepeatSource> {
    descendants(visits, position).iter().find_map(|visit| {
        visit.descriptor.primary_label().map(|label| YeRepeatSource {
            label: label.to_string(),
            worksheet: visit.descriptor.worksheet.clone(),
        })
    })
}

/// Number of rows the container should end up with.
pub fn repeat_count(sheet: &YeSheetData, source: &YeRepeatSource) -> Result<usize> {
    let worksheet = sheet
        .worksheet(source.worksheet.as_deref())
        .ok_or_else(|| {
            YeError::worksheet_not_found(source.worksheet.as_deref().unwrap_or(sheet.active_worksheet.as_str()))
        })?;
    worksheet
        .values(&source.label)
        .map(<[String]>::len)
        .ok_or_else(|| YeError::label_not_found(&source.label, &worksheet.name))
}

#[derive(Default)]
struct YeRepeatJournal {
    /// Clones and whether they were attached to the container.
    clones: Vec<(YeNodeId, bool)>,
    /// Detached children with their original index.
    removed: Vec<(usize, YeNodeId)>,
}

/// Clones or removes children of `container` until it has `target` of them.
///
/// The first child is the template. A `target` of zero is rejected; callers
/// leave such containers untouched.
pub fn expand_container<H>(host: &mut H, container: &YeNodeId, target: usize) -> Result<YeRepeatOutcome>
where
    H: YeSceneGraph + YeContainerMutator + ?Sized,
{
    let children = host.children(container);
    let before = children.len();
    let Some(template) = children.first().cloned() else {
        return Err(YeError::repeat(container.as_str(), "container has no template child"));
    };
    if target == 0 {
        return Err(YeError::repeat(container.as_str(), "target row count is zero"));
    }

    let mut journal = YeRepeatJournal::default();
    let applied = if target > before {
        grow(host, container, &template, target - before, &mut journal)
    } else {
        shrink(host, container, &children, target, &mut journal)
    };

    if let Err(err) = applied {
        log::error!(
            "sync.repeat.rollback: expansion failed, restoring container - container={}, error={}",
            container,
            err
        );
        return Err(match rollback(host, container, journal) {
            Ok(()) => YeError::repeat(container.as_str(), err.message),
            Err(rollback_err) => YeError::repeat(
                container.as_str(),
                format!("{}; rollback failed: {}", err.message, rollback_err.message),
            ),
        });
    }

    for (_, detached) in journal.removed {
        if let Err(err) = host.destroy_node(&detached) {
            log::warn!(
                "sync.repeat.cleanup: could not destroy removed child - container={}, child={}, error={}",
                container,
                detached,
                err
            );
        }
    }

    log::info!(
        "sync.repeat.expanded: container resized - container={}, before={}, after={}",
        container,
        before,
        target
    );
    Ok(YeRepeatOutcome {
        container: container.clone(),
        before,
        after: target,
    })
}

fn grow<H>(
    host: &mut H,
    container: &YeNodeId,
    template: &YeNodeId,
    missing: usize,
    journal: &mut YeRepeatJournal,
) -> std::result::Result<(), YeCapabilityError>
where
    H: YeContainerMutator + ?Sized,
{
    for _ in 0..missing {
        let clone = host.clone_node(template)?;
        journal.clones.push((clone.clone(), false));
        host.append_child(container, &clone)?;
        if let Some(last) = journal.clones.last_mut() {
            last.1 = true;
        }
    }
    Ok(())
}

fn shrink<H>(
    host: &mut H,
    container: &YeNodeId,
    children: &[YeNodeId],
    target: usize,
    journal: &mut YeRepeatJournal,
) -> std::result::Result<(), YeCapabilityError>
where
    H: YeContainerMutator + ?Sized,
{
    for index in (target..children.len()).rev() {
        host.remove_child(container, &children[index])?;
        journal.removed.push((index, children[index].clone()));
    }
    Ok(())
}

/// Undoes a partial expansion, continuing past individual failures.
fn rollback<H>(
    host: &mut H,
    container: &YeNodeId,
    journal: YeRepeatJournal,
) -> std::result::Result<(), YeCapabilityError>
where
    H: YeContainerMutator + ?Sized,
{
    let mut first_failure = None;

    for (clone, attached) in journal.clones.into_iter().rev() {
        let undone = if attached {
            host.remove_child(container, &clone)
                .and_then(|_| host.destroy_node(&clone))
        } else {
            host.destroy_node(&clone)
        };
        if let Err(err) = undone {
            first_failure.get_or_insert(err);
        }
    }

    let mut removed = journal.removed;
    removed.sort_by_key(|(index, _)| *index);
    for (index, child) in removed {
        if let Err(err) = host.insert_child(container, index, &child) {
            first_failure.get_or_insert(err);
        }
    }

    match first_failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
