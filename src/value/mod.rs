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

//! # Value Module
//!
//! Grammars for cell values that are more than literal text.
//!
//! - **Directives** ([directive.rs](directive/index.html)): one typed style
//!   token per family, tried in a fixed priority order
//! - **Chained values** ([chained.rs](chained/index.html)): tokenizer and the
//!   last-write-wins fold of several directives into one `YeChainedValue`
//! - **Variants** ([variant.rs](variant/index.html)): `Property=Value` pairs
//!   used to select a component variant
//!
//! ## Priority Order
//!
//! | Family | Examples |
//! |--------|----------|
//! | visibility | `show`, `hide` |
//! | color | `#F`, `#80`, `#F00`, `#FF8800` |
//! | opacity | `50%` |
//! | dimension | `100s`, `40w`, `20h` |
//! | position | `10xx`, `-4y` |
//! | rotation | `30º`, `-15°` |
//! | text metrics | `text-align:center`, `font-size:14`, `line-height:auto`, `letter-spacing:2%` |

pub mod chained;
pub mod directive;
pub mod variant;

pub use chained::{parse_chained, parse_chained_exact, parse_single, parse_style, tokenize, YeChainedValue};
pub use directive::{
    parse_directive, YeAxis, YeColor, YeDimension, YeLetterSpacing, YeLineHeight, YePosition,
    YeStyleDirective, YeStyleKind, YeTextAlign, YeVisibility,
};
pub use variant::{is_url, is_variant_reference, parse_variant_properties};
