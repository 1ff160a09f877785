// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Options that defines SVG parsing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParseOptions {
    /// Remove whitespace-only text nodes and trim the remaining text
    /// before the semantic parsing.
    ///
    /// Default: enabled
    pub trim_whitespace: bool,

    /// Keep comment nodes in the parsed trees.
    ///
    /// Comments are still present in the source text, so disabling this
    /// option doesn't affect generated text patches.
    ///
    /// Default: enabled
    pub keep_comments: bool,
}

impl Default for ParseOptions {
    fn default() -> ParseOptions {
        ParseOptions {
            trim_whitespace: true,
            keep_comments: true,
        }
    }
}
