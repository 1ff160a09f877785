// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! This module contains submodules which represent SVG value types.
//!
//! Each type can be parsed from an attribute string via [`Accept`]
//! and written back via [`WriteBuffer`]. Writing is an inverse of parsing
//! modulo formatting: `accept(write(accept(s)))` is equal to `accept(s)`.
//!
//! [`Accept`]: ../trait.Accept.html
//! [`WriteBuffer`]: ../trait.WriteBuffer.html

use thiserror::Error;

pub use self::color::{Color, ColorFormat};
pub use self::font::{FontFamily, FontSize, FontWeight};
pub use self::keywords::*;
pub use self::length::{Dasharray, Length, LengthUnit};
pub use self::number::{ClassList, Ratio};
pub use self::paint::{FuncIri, Paint};
pub use self::path::{PathCommands, PathSegment};
pub use self::points::{Points, ViewBox};
pub use self::transform::{compose, merge, Descriptor, Matrix, Transform};

pub(crate) use self::number::write_num;

mod color;
mod font;
mod keywords;
mod length;
mod number;
mod paint;
mod path;
mod points;
pub mod transform;

/// Value parsing errors.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum ValueError {
    /// A value doesn't match the grammar of its type.
    #[error("'{value}' is not a valid {kind}")]
    InvalidValue {
        /// A human readable type name.
        kind: &'static str,
        /// The rejected text.
        value: String,
    },

    /// A list has an unexpected amount of numbers.
    #[error("expected {expected} numbers, found {found}")]
    InvalidNumberCount {
        #[allow(missing_docs)]
        expected: &'static str,
        #[allow(missing_docs)]
        found: usize,
    },

    /// A transform list parsing error.
    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    /// A path data parsing error.
    #[error("invalid path data: {0}")]
    InvalidPath(String),
}

impl ValueError {
    pub(crate) fn invalid(kind: &'static str, value: &str) -> Self {
        ValueError::InvalidValue {
            kind,
            value: value.to_string(),
        }
    }
}
