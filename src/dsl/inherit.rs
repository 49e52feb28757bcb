//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd project team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

use crate::dsl::ir::YeBindingDescriptor;

/// Fills `worksheet` and `index` from the nearest ancestor that defines them.
///
/// `ancestors` is ordered nearest first. Values already present on the
/// descriptor are kept; labels and flags are never inherited.
pub fn resolve_inherited<'a, I>(descriptor: &YeBindingDescriptor, ancestors: I) -> YeBindingDescriptor
where
    I: IntoIterator<Item = &'a YeBindingDescriptor>,
{
    let mut resolved = descriptor.clone();

    for ancestor in ancestors {
        if resolved.worksheet.is_some() && resolved.index.is_some() {
            break;
        }
        if resolved.worksheet.is_none() {
            resolved.worksheet = ancestor.worksheet.clone();
        }
        if resolved.index.is_none() {
            resolved.index = ancestor.index;
        }
    }

    resolved
}
