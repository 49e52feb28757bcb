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

//! # Capability Module
//!
//! Collaborator interfaces the host document supplies to the sync engine.
//! The engine never touches visual properties itself; it reads the layer
//! tree through [`YeSceneGraph`], restructures repeat containers through
//! [`YeContainerMutator`] and hands resolved values to [`YeContentSetter`]
//! and [`YeStyleApplier`].
//!
//! ## Failure Model
//!
//! Every capability reports failures as [`YeCapabilityError`]. A recoverable
//! failure is recorded against the layer and the run moves on; a fatal one
//! aborts the run.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::YeError;
use crate::value::chained::YeChainedValue;

/// Opaque identifier of a host node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YeNodeId(pub String);

impl YeNodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YeNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for YeNodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for YeNodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YeLayerKind {
    Text,
    Instance,
    Frame,
    Group,
    Component,
    ComponentSet,
    Shape,
    Other,
}

impl YeLayerKind {
    pub fn is_text(&self) -> bool {
        matches!(self, YeLayerKind::Text)
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, YeLayerKind::Instance)
    }

    /// Kinds that can hold children.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            YeLayerKind::Frame
                | YeLayerKind::Group
                | YeLayerKind::Component
                | YeLayerKind::ComponentSet
                | YeLayerKind::Instance
        )
    }

    pub fn is_main_component(&self) -> bool {
        matches!(self, YeLayerKind::Component | YeLayerKind::ComponentSet)
    }
}

/// Snapshot of one layer as the engine sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeLayerInfo {
    pub id: YeNodeId,
    pub name: String,
    pub kind: YeLayerKind,
    pub visible: bool,
}

/// A swappable main component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YeComponentInfo {
    pub id: YeNodeId,
    pub name: String,
    /// Name of the owning component set, for variants.
    pub set_name: Option<String>,
    /// Variant properties in declaration order.
    pub properties: Vec<(String, String)>,
}

impl YeComponentInfo {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Failure raised by a host capability.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct YeCapabilityError {
    pub message: String,
    pub recoverable: bool,
}

impl YeCapabilityError {
    pub fn recoverable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recoverable: true,
        }
    }

    /// A failure that aborts the whole run.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            recoverable: false,
        }
    }
}

impl From<YeCapabilityError> for YeError {
    fn from(err: YeCapabilityError) -> Self {
        YeError::Capability {
            message: err.message,
            recoverable: err.recoverable,
        }
    }
}

/// Read access to the host layer tree.
pub trait YeSceneGraph {
    fn layer(&self, id: &YeNodeId) -> Option<YeLayerInfo>;

    /// Direct children in paint order.
    fn children(&self, id: &YeNodeId) -> Vec<YeNodeId>;

    /// Every main component reachable from the sync scope.
    fn components(&self) -> Vec<YeComponentInfo>;

    /// The main component an instance currently points at.
    fn instance_component(&self, id: &YeNodeId) -> Option<YeComponentInfo>;
}

/// Structural edits used by repeat expansion.
pub trait YeContainerMutator {
    /// Deep-copies `id`; the copy is detached until appended.
    fn clone_node(&mut self, id: &YeNodeId) -> Result<YeNodeId, YeCapabilityError>;

    fn append_child(&mut self, parent: &YeNodeId, child: &YeNodeId) -> Result<(), YeCapabilityError>;

    fn insert_child(
        &mut self,
        parent: &YeNodeId,
        index: usize,
        child: &YeNodeId,
    ) -> Result<(), YeCapabilityError>;

    /// Detaches `child`; it stays alive and can be re-inserted.
    fn remove_child(&mut self, parent: &YeNodeId, child: &YeNodeId) -> Result<(), YeCapabilityError>;

    /// Destroys a detached node for good.
    fn destroy_node(&mut self, id: &YeNodeId) -> Result<(), YeCapabilityError>;
}

#[async_trait(?Send)]
pub trait YeContentSetter {
    async fn set_text(&mut self, id: &YeNodeId, text: &str) -> Result<(), YeCapabilityError>;

    async fn swap_component(
        &mut self,
        id: &YeNodeId,
        component: &YeComponentInfo,
    ) -> Result<(), YeCapabilityError>;
}

#[async_trait(?Send)]
pub trait YeStyleApplier {
    /// Applies the supported slots of `style`.
    ///
    /// Returns one warning per slot the layer cannot take.
    async fn apply_style(
        &mut self,
        id: &YeNodeId,
        style: &YeChainedValue,
    ) -> Result<Vec<String>, YeCapabilityError>;
}

/// Decides whether a value names an external resource.
pub trait YeResourceTest {
    fn is_resource_reference(&self, value: &str) -> bool;
}

/// Treats `http(s)://` strings without inner whitespace as resources.
#[derive(Clone, Copy, Debug, Default)]
pub struct YeUrlResourceTest;

impl YeResourceTest for YeUrlResourceTest {
    fn is_resource_reference(&self, value: &str) -> bool {
        let value = value.trim();
        crate::value::variant::is_url(value) && !value.chars().any(char::is_whitespace)
    }
}

/// Everything the sync engine needs from a host document.
pub trait YeHost: YeSceneGraph + YeContainerMutator + YeContentSetter + YeStyleApplier {}

impl<T> YeHost for T where T: YeSceneGraph + YeContainerMutator + YeContentSetter + YeStyleApplier {}
