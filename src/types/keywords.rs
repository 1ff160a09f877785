// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Keyword-only attribute values.

use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $($variant:ident => $text:literal),+ $(,)*) => (
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[allow(missing_docs)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Returns the keyword as written in SVG.
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Accept for $name {
            fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
                match text.trim() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(ValueError::invalid($kind, text)),
                }
            }
        }

        impl WriteBuffer for $name {
            fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
                buf.extend_from_slice(self.as_str().as_bytes());
            }
        }

        impl FixPrecision for $name {
            fn fix_precision(&self, _: u8) -> Self {
                *self
            }
        }

        impl_display!($name);
    )
}

keyword_enum!(
    /// The `fill-rule` value.
    FillRule, "fill rule",
    NonZero => "nonzero",
    EvenOdd => "evenodd",
    Inherit => "inherit",
);

keyword_enum!(
    /// The `stroke-linecap` value.
    LineCap, "line cap",
    Butt => "butt",
    Round => "round",
    Square => "square",
    Inherit => "inherit",
);

keyword_enum!(
    /// The `stroke-linejoin` value.
    LineJoin, "line join",
    Miter => "miter",
    MiterClip => "miter-clip",
    Round => "round",
    Bevel => "bevel",
    Arcs => "arcs",
    Inherit => "inherit",
);

keyword_enum!(
    /// The `font-style` value.
    FontStyle, "font style",
    Normal => "normal",
    Italic => "italic",
    Oblique => "oblique",
    Inherit => "inherit",
);

keyword_enum!(
    /// The `gradientUnits` value.
    GradientUnits, "gradient units",
    UserSpaceOnUse => "userSpaceOnUse",
    ObjectBoundingBox => "objectBoundingBox",
);

keyword_enum!(
    /// The `spreadMethod` value.
    SpreadMethod, "spread method",
    Pad => "pad",
    Reflect => "reflect",
    Repeat => "repeat",
);

keyword_enum!(
    /// The `text-anchor` value.
    TextAnchor, "text anchor",
    Start => "start",
    Middle => "middle",
    End => "end",
    Inherit => "inherit",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_1() {
        assert_eq!(FillRule::accept("evenodd", "fill-rule").unwrap(), FillRule::EvenOdd);
        assert_eq!(LineJoin::accept(" miter-clip ", "stroke-linejoin").unwrap(), LineJoin::MiterClip);
        assert_eq!(
            GradientUnits::accept("userSpaceOnUse", "gradientUnits").unwrap(),
            GradientUnits::UserSpaceOnUse
        );
    }

    #[test]
    fn parse_err_1() {
        // keywords are case-sensitive
        assert!(FontStyle::accept("Italic", "font-style").is_err());
        assert!(LineCap::accept("", "stroke-linecap").is_err());
    }

    #[test]
    fn write_1() {
        assert_eq!(TextAnchor::Middle.to_string(), "middle");
        assert_eq!(SpreadMethod::Reflect.to_string(), "reflect");
    }
}
