// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Structural diff to text patch engine.
//!
//! The original positioned tree is compared with an edited snapshot and
//! the difference is expressed as a list of text edits against the original
//! source text. Unrelated formatting, comments and whitespace are kept.

use thiserror::Error;

use crate::xml::{LosslessNode, XmlElement};
use crate::Interval;

pub use self::apply::apply;

mod apply;
mod index;
mod structural;
mod translate;

/// A single text edit.
///
/// All offsets are relative to the original, unmodified text.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum XmlDiff {
    /// Replaces an interval with a text.
    Modify {
        #[allow(missing_docs)]
        interval: Interval,
        #[allow(missing_docs)]
        text: String,
    },
    /// Inserts a text at a position.
    Add {
        #[allow(missing_docs)]
        pos: usize,
        #[allow(missing_docs)]
        text: String,
    },
    /// Removes an interval.
    Delete {
        #[allow(missing_docs)]
        interval: Interval,
    },
}

impl XmlDiff {
    /// Returns the affected interval. Empty for insertions.
    pub fn interval(&self) -> Interval {
        match *self {
            XmlDiff::Modify { interval, .. } | XmlDiff::Delete { interval } => interval,
            XmlDiff::Add { pos, .. } => Interval::empty(pos),
        }
    }

    /// Returns the inserted text, if any.
    pub fn text(&self) -> Option<&str> {
        match *self {
            XmlDiff::Modify { ref text, .. } | XmlDiff::Add { ref text, .. } => Some(text),
            XmlDiff::Delete { .. } => None,
        }
    }
}

/// Diff engine errors.
///
/// They indicate a broken contract between the trees and never depend on the user input.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum DiffError {
    /// A structural diff doesn't match the node it is applied to.
    #[error("unexpected diff shape: {0}")]
    UnexpectedShape(String),

    /// A child index points outside of the original children.
    #[error("child index {index} is out of range, the element has {len} children")]
    ChildOutOfRange {
        #[allow(missing_docs)]
        index: usize,
        #[allow(missing_docs)]
        len: usize,
    },

    /// An attribute has no recorded position.
    #[error("attribute '{0}' has no source position")]
    MissingAttribute(String),

    /// Two edits touch the same text.
    #[error("edit at {interval} overlaps a previous edit ending at {cursor}")]
    Overlap {
        #[allow(missing_docs)]
        interval: Interval,
        #[allow(missing_docs)]
        cursor: usize,
    },

    /// An edit lies outside of the text or splits a character.
    #[error("edit at {interval} is out of the text bounds")]
    OutOfBounds {
        #[allow(missing_docs)]
        interval: Interval,
    },
}

/// Computes text edits that turn `original` into `edited`.
///
/// `original` must be the tree the text was parsed into, with the same
/// normalizations as the tree `edited` was made from. An empty list means
/// that there are no changes.
pub fn diff(original: &XmlElement, edited: &LosslessNode) -> Result<Vec<XmlDiff>, DiffError> {
    let mut out = Vec::new();
    if let Some(d) = structural::diff_root(original, edited) {
        translate::root(original, &d, &mut out)?;
    }

    debug!("Generated {} text edits.", out.len());
    for d in &out {
        trace!("{:?}", d);
    }

    Ok(out)
}
