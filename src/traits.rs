// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Interval, ValueError, Warning, WriteOptions};

/// A trait for parsing a typed value from an attribute string.
pub trait Accept: Sized {
    /// Whether an attribute with an invalid value is still treated as handled.
    ///
    /// Handled attributes are never swept into the `unknown` bucket.
    const CONSUMED_ON_ERROR: bool = false;

    /// Parses `text`, which is the raw value of the attribute `attr`.
    fn accept(text: &str, attr: &str) -> Result<Self, ValueError>;

    /// Same as `accept`, but recoverable problems found inside the value
    /// can be reported as warnings at `interval`.
    fn accept_reporting(
        text: &str,
        attr: &str,
        _interval: Interval,
        _warns: &mut Vec<Warning>,
    ) -> Result<Self, ValueError> {
        Self::accept(text, attr)
    }
}

impl Accept for String {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        Ok(text.to_string())
    }
}

/// A trait for writing a data to the buffer.
pub trait WriteBuffer {
    /// Writes data to the `Vec<u8>` buffer using specified `WriteOptions`.
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>);

    /// Writes data to the `Vec<u8>` buffer using default `WriteOptions`.
    fn write_buf(&self, buf: &mut Vec<u8>) {
        self.write_buf_opt(&WriteOptions::default(), buf);
    }
}

impl WriteBuffer for String {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.as_bytes());
    }
}

/// A trait for converting a value to a `String` with `WriteOptions`.
///
/// A tunable `to_string()` alternative.
pub trait ToStringWithOptions: WriteBuffer {
    /// Writes data to the `String` using specified `WriteOptions`.
    fn to_string_with_opt(&self, opt: &WriteOptions) -> String {
        let mut out = Vec::with_capacity(32);
        self.write_buf_opt(opt, &mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl ToStringWithOptions for String {}

/// Rounds every numeric leaf of a value to a fixed number of decimal places.
///
/// The structure of the value is never changed and the original is left intact.
pub trait FixPrecision {
    /// Returns a copy of the value with all numbers rounded to `digits` places.
    fn fix_precision(&self, digits: u8) -> Self;
}

impl FixPrecision for String {
    fn fix_precision(&self, _: u8) -> Self {
        self.clone()
    }
}

macro_rules! impl_display {
    ($t:ty) => (
        impl ::std::fmt::Display for $t {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                let mut out = Vec::with_capacity(32);
                $crate::WriteBuffer::write_buf(self, &mut out);
                write!(f, "{}", String::from_utf8_lossy(&out))
            }
        }

        impl $crate::ToStringWithOptions for $t {}
    )
}
