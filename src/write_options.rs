// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Options that defines SVG writing.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WriteOptions {
    /// Round numbers to the specified number of decimal places.
    ///
    /// Applied only to values that are actually written,
    /// parsed values are never changed.
    ///
    /// # Examples
    ///
    /// `x="10.123456"` -> `x="10.12"` with `Some(2)`
    ///
    /// Default: `None`
    pub precision: Option<u8>,

    /// Keep the original attribute text when it still decodes
    /// to the current attribute value.
    ///
    /// This keeps untouched attributes byte-identical, so the generated
    /// text patches touch only the edited values.
    ///
    /// # Examples
    ///
    /// `r="40.0"` stays `r="40.0"` instead of `r="40"`
    ///
    /// Default: enabled
    pub preserve_source_values: bool,
}

impl Default for WriteOptions {
    fn default() -> WriteOptions {
        WriteOptions {
            precision: None,
            preserve_source_values: true,
        }
    }
}
