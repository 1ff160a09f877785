// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::NumberListParser;

use super::number::{round_to, write_num};
use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

fn parse_numbers(text: &str, kind: &'static str) -> Result<Vec<f64>, ValueError> {
    let list = NumberListParser::from(text)
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| ValueError::invalid(kind, text))?;

    if list.iter().all(|n| n.is_finite()) {
        Ok(list)
    } else {
        Err(ValueError::invalid(kind, text))
    }
}

fn write_pairs(pairs: &[(f64, f64)], buf: &mut Vec<u8>) {
    for (i, &(x, y)) in pairs.iter().enumerate() {
        if i != 0 {
            buf.push(b' ');
        }
        write_num(x, buf);
        buf.push(b',');
        write_num(y, buf);
    }
}

/// Representation of the `points` attribute of `polyline` and `polygon`.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Points(pub Vec<(f64, f64)>);

impl Accept for Points {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let list = parse_numbers(text, "points")?;
        if list.len() % 2 != 0 {
            return Err(ValueError::InvalidNumberCount {
                expected: "an even amount of",
                found: list.len(),
            });
        }

        Ok(Points(list.chunks(2).map(|p| (p[0], p[1])).collect()))
    }
}

impl WriteBuffer for Points {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        write_pairs(&self.0, buf);
    }
}

impl FixPrecision for Points {
    fn fix_precision(&self, digits: u8) -> Self {
        Points(
            self.0
                .iter()
                .map(|&(x, y)| (round_to(x, digits), round_to(y, digits)))
                .collect(),
        )
    }
}

impl_display!(Points);

/// Representation of the `viewBox` attribute.
///
/// Stored as two point pairs: the origin and the size.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ViewBox {
    /// `min-x` and `min-y`.
    pub origin: (f64, f64),
    /// `width` and `height`.
    pub size: (f64, f64),
}

impl ViewBox {
    /// Constructs a new view box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        ViewBox {
            origin: (x, y),
            size: (width, height),
        }
    }

    /// Returns the bottom-right corner.
    pub fn corner(&self) -> (f64, f64) {
        (self.origin.0 + self.size.0, self.origin.1 + self.size.1)
    }
}

impl Accept for ViewBox {
    // An invalid `viewBox` is reported, but never kept as an unknown attribute.
    const CONSUMED_ON_ERROR: bool = true;

    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let list = parse_numbers(text, "view box")?;
        if list.len() != 4 {
            return Err(ValueError::InvalidNumberCount {
                expected: "4",
                found: list.len(),
            });
        }

        Ok(ViewBox::new(list[0], list[1], list[2], list[3]))
    }
}

impl WriteBuffer for ViewBox {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        let nums = [self.origin.0, self.origin.1, self.size.0, self.size.1];
        for (i, n) in nums.iter().enumerate() {
            if i != 0 {
                buf.push(b' ');
            }
            write_num(*n, buf);
        }
    }
}

impl FixPrecision for ViewBox {
    fn fix_precision(&self, digits: u8) -> Self {
        ViewBox::new(
            round_to(self.origin.0, digits),
            round_to(self.origin.1, digits),
            round_to(self.size.0, digits),
            round_to(self.size.1, digits),
        )
    }
}

impl_display!(ViewBox);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_1() {
        let p = Points::accept("10,20 30,40 50 60", "points").unwrap();
        assert_eq!(p.0, vec![(10.0, 20.0), (30.0, 40.0), (50.0, 60.0)]);
        assert_eq!(p.to_string(), "10,20 30,40 50,60");
    }

    #[test]
    fn points_err_1() {
        assert_eq!(
            Points::accept("10,20 30", "points"),
            Err(ValueError::InvalidNumberCount { expected: "an even amount of", found: 3 })
        );
        assert!(Points::accept("10,20 x", "points").is_err());
    }

    macro_rules! test_view_box {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(ViewBox::accept($text, "viewBox").ok(), $result);
            }
        )
    }

    test_view_box!(view_box_1, "0 0 100 50", Some(ViewBox::new(0.0, 0.0, 100.0, 50.0)));
    test_view_box!(view_box_2, "-5,-5,10,10", Some(ViewBox::new(-5.0, -5.0, 10.0, 10.0)));
    test_view_box!(view_box_3, "0 0 100", None);
    test_view_box!(view_box_4, "0 0 100 50 1", None);
    test_view_box!(view_box_5, "", None);

    #[test]
    fn view_box_corner() {
        let vb = ViewBox::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(vb.corner(), (110.0, 70.0));
        assert_eq!(vb.to_string(), "10 20 100 50");
    }
}
