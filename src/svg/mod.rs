// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Semantic SVG tree.
//!
//! Each supported element owns a closed attribute record where every known
//! attribute is present as an `Option`. Attributes that are not part of the
//! record, or that failed to parse, are kept as raw strings in the element's
//! `unknown` map. Unsupported elements are kept as is.

pub use self::attr_value::AttrValue;
pub use self::attrs::*;
pub use self::css::{resolve_presentation, Stylesheet};
pub use self::element::{Element, ParsedElement, ParsedNode, UnknownElement};
pub use self::parser::{parse, Parsed};
pub use self::style::Style;
pub use self::use_box::{invalidate_virtual_boxes, viewport, VirtualBox, VirtualCache};

mod attr_value;
mod attrs;
mod claims;
mod css;
mod element;
mod parser;
mod project;
mod style;
mod use_box;
