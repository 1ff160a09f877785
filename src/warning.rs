// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

use crate::interval::{text_pos, TextPos};
use crate::Interval;

/// A recoverable problem found during the semantic parsing.
///
/// Warnings never abort parsing. The interval points to the offending
/// source text, usually an attribute value.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Warning {
    #[allow(missing_docs)]
    pub interval: Interval,
    #[allow(missing_docs)]
    pub message: String,
}

impl Warning {
    /// Constructs a new warning.
    pub fn new<S: Into<String>>(interval: Interval, message: S) -> Self {
        Warning {
            interval,
            message: message.into(),
        }
    }

    /// Returns the row/column position of the warning start inside `text`.
    pub fn text_pos(&self, text: &str) -> TextPos {
        text_pos(text, self.interval.start)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.interval)
    }
}
