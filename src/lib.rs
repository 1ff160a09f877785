// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
This library is designed to edit SVG data without losing its original formatting.

Here is simple overview of the data flow:

- source text
    - positioned XML tree ([`xml::XmlElement`]), every node and attribute
      remembers its byte interval
        - semantic SVG tree ([`svg::ParsedElement`]), typed attribute
          records, raw unknown attributes and elements, warnings
            - position-free snapshot ([`xml::LosslessNode`]) after editing
                - text edits ([`diff::XmlDiff`]) against the source text

The positioned tree is never edited. After the semantic tree was changed,
it is projected into a snapshot and compared with the positioned tree.
The difference is expressed as insertions, replacements and deletions
relative to the original text, so everything that wasn't touched,
like whitespace, comments, quotes and number formatting, stays as is.

The [`Document`] type wraps the whole pipeline.

&nbsp;

See modules and structs documentation for details.

[`Document`]: struct.Document.html
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::document::Document;
pub use crate::error::{Error, LookupError};
pub use crate::interval::{text_pos, Interval, TextPos};
pub use crate::parse_options::ParseOptions;
pub use crate::traits::*;
pub use crate::types::ValueError;
pub use crate::warning::Warning;
pub use crate::write_options::WriteOptions;

#[macro_use]
mod traits;

mod document;
mod error;
mod interval;
mod parse_options;
mod warning;
mod write_options;

pub mod diff;
pub mod dom;
pub mod svg;
pub mod types;
pub mod xml;
