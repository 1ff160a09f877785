// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::svg::Style;
use crate::types::*;
use crate::{Accept, FixPrecision, WriteBuffer, WriteOptions};

macro_rules! attr_value {
    ($($variant:ident($ty:ty),)+) => (
        /// A typed attribute value of any kind.
        ///
        /// Used for generic access to attribute records.
        #[derive(Clone, PartialEq, Debug)]
        #[allow(missing_docs)]
        pub enum AttrValue {
            $($variant($ty),)+
        }

        $(
            impl From<$ty> for AttrValue {
                fn from(v: $ty) -> Self {
                    AttrValue::$variant(v)
                }
            }
        )+

        impl AttrValue {
            /// Checks that `raw` decodes to the current value.
            pub fn matches_raw(&self, attr: &str, raw: &str) -> bool {
                match *self {
                    $(
                        AttrValue::$variant(ref v) => match <$ty as Accept>::accept(raw, attr) {
                            Ok(ref parsed) => parsed == v,
                            Err(_) => false,
                        },
                    )+
                }
            }
        }

        impl WriteBuffer for AttrValue {
            fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
                match *self {
                    $(AttrValue::$variant(ref v) => v.write_buf_opt(opt, buf),)+
                }
            }
        }

        impl FixPrecision for AttrValue {
            fn fix_precision(&self, digits: u8) -> Self {
                match *self {
                    $(AttrValue::$variant(ref v) => AttrValue::$variant(v.fix_precision(digits)),)+
                }
            }
        }
    )
}

attr_value!(
    String(String),
    ClassList(ClassList),
    Length(Length),
    Ratio(Ratio),
    Paint(Paint),
    Color(Color),
    Transform(Transform),
    Path(PathCommands),
    Points(Points),
    ViewBox(ViewBox),
    FontFamily(FontFamily),
    FontSize(FontSize),
    FontWeight(FontWeight),
    FontStyle(FontStyle),
    Dasharray(Dasharray),
    FillRule(FillRule),
    LineCap(LineCap),
    LineJoin(LineJoin),
    GradientUnits(GradientUnits),
    SpreadMethod(SpreadMethod),
    TextAnchor(TextAnchor),
    Style(Style),
);

impl_display!(AttrValue);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_raw_1() {
        let v = AttrValue::from(Length::new(40.0, None, "r"));
        assert!(v.matches_raw("r", "40.0"));
        assert!(v.matches_raw("r", " 40 "));
        assert!(!v.matches_raw("r", "40px"));
        assert!(!v.matches_raw("r", "forty"));
    }

    #[test]
    fn matches_raw_2() {
        let v = AttrValue::from(Paint::accept("red", "fill").unwrap());
        assert!(v.matches_raw("fill", "red"));
        // same color, different notation
        assert!(!v.matches_raw("fill", "#ff0000"));
    }

    #[test]
    fn fix_precision_1() {
        let v = AttrValue::from(Length::new(1.23456, None, "x"));
        assert_eq!(v.fix_precision(2).to_string(), "1.23");
    }
}
