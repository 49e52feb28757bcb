//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Ye.
//! The Ye project belongs to the Dunimd project team.
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

//! # Layer-Name DSL Module
//!
//! Layers opt into data binding through small annotations in their names.
//! This module turns a layer name into a structured binding descriptor and
//! resolves the values a layer inherits from its ancestors.
//!
//! ## Architecture
//!
//! - **IR** ([ir.rs](ir/index.html)): `YeBindingDescriptor` and the
//!   `YeIndexDirective` row-selection policies
//! - **Parser** ([parser.rs](parser/index.html)): permissive, never-failing
//!   parser for the annotation grammar
//! - **Inheritance** ([inherit.rs](inherit/index.html)): nearest-ancestor
//!   fill-in of worksheet and index
//!
//! ## Grammar
//!
//! ```text
//! -Anything            ignored, subtree excluded
//! +#Title              force-include (synced even when hidden)
//! #Title               bind to the "Title" label, next row
//! #Name #Color.3       "Name" for content, "Color" for style, row 3
//! // People #Name.r    worksheet "People", random non-blank row
//! Cards @#             repeat container
//! ```
//!
//! Index suffixes: `.<digits>` specific row (1-based), `.n` increment,
//! `.i` increment skipping blanks, `.x` random, `.r` random skipping blanks.

pub mod inherit;
pub mod ir;
pub mod parser;

pub use inherit::resolve_inherited;
pub use ir::{YeBindingDescriptor, YeIndexDirective};
pub use parser::{parse_layer_name, YeLabelParser};
