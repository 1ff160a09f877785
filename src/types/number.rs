// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").expect("valid regex")
    })
}

/// Parses a single `<number>`.
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if !number_regex().is_match(text) {
        return None;
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Scans a `<number>` starting at `pos`.
///
/// Returns the number and the position right after it.
pub(crate) fn scan_number(text: &str, pos: usize) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut end = pos;

    if matches!(bytes.get(end), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let digits_start = end;
    while matches!(bytes.get(end), Some(c) if c.is_ascii_digit()) {
        end += 1;
    }

    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while matches!(bytes.get(end), Some(c) if c.is_ascii_digit()) {
            end += 1;
        }
    }

    // a sign or a dot alone is not a number
    if !text[digits_start..end].bytes().any(|c| c.is_ascii_digit()) {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }

        if matches!(bytes.get(exp_end), Some(c) if c.is_ascii_digit()) {
            while matches!(bytes.get(exp_end), Some(c) if c.is_ascii_digit()) {
                exp_end += 1;
            }
            end = exp_end;
        }
    }

    let n = text[pos..end].parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some((n, end))
}

/// Splits a list separated by whitespaces and/or commas.
pub(crate) fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c == ',' || c.is_ascii_whitespace())
        .filter(|s| !s.is_empty())
}

/// Writes a number in the shortest form that parses back to the same value.
pub(crate) fn write_num(num: f64, buf: &mut Vec<u8>) {
    // also handles -0
    if num == 0.0 || !num.is_finite() {
        buf.push(b'0');
        return;
    }

    buf.extend_from_slice(num.to_string().as_bytes());
}

/// Rounds a number to `digits` decimal places.
pub(crate) fn round_to(num: f64, digits: u8) -> f64 {
    let multiplier = 10f64.powi(i32::from(digits));
    let rounded = (num * multiplier).round() / multiplier;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

impl FixPrecision for f64 {
    fn fix_precision(&self, digits: u8) -> Self {
        round_to(*self, digits)
    }
}

impl WriteBuffer for f64 {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        write_num(*self, buf);
    }
}

/// Representation of a `<number> | <percentage>` value, like `opacity`.
///
/// The number is stored as written: `50%` is `value: 50.0, percent: true`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ratio {
    #[allow(missing_docs)]
    pub value: f64,
    #[allow(missing_docs)]
    pub percent: bool,
}

impl Ratio {
    /// Constructs a new plain number ratio.
    pub fn new(value: f64) -> Self {
        Ratio { value, percent: false }
    }

    /// Returns the ratio as a fraction, so `50%` becomes `0.5`.
    pub fn as_fraction(&self) -> f64 {
        if self.percent {
            self.value / 100.0
        } else {
            self.value
        }
    }
}

impl Accept for Ratio {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let trimmed = text.trim();
        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(n) => (n, true),
            None => (trimmed, false),
        };

        match parse_number(number) {
            Some(value) if number.trim() == number => Ok(Ratio { value, percent }),
            _ => Err(ValueError::invalid("ratio", text)),
        }
    }
}

impl WriteBuffer for Ratio {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        write_num(self.value, buf);
        if self.percent {
            buf.push(b'%');
        }
    }
}

impl FixPrecision for Ratio {
    fn fix_precision(&self, digits: u8) -> Self {
        Ratio {
            value: round_to(self.value, digits),
            percent: self.percent,
        }
    }
}

impl_display!(Ratio);

/// A whitespace separated list of class names.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct ClassList(pub Vec<String>);

impl ClassList {
    /// Checks that the list contains `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }
}

impl Accept for ClassList {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        Ok(ClassList(text.split_ascii_whitespace().map(String::from).collect()))
    }
}

impl WriteBuffer for ClassList {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.0.join(" ").as_bytes());
    }
}

impl FixPrecision for ClassList {
    fn fix_precision(&self, _: u8) -> Self {
        self.clone()
    }
}

impl_display!(ClassList);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_number {
        ($name:ident, $num:expr, $result:expr) => (
            #[test]
            fn $name() {
                let mut v = Vec::new();
                write_num($num, &mut v);
                assert_eq!(String::from_utf8(v).unwrap(), $result);
            }
        )
    }

    test_number!(gen_number_1, 1.0, "1");
    test_number!(gen_number_2, 1.5, "1.5");
    test_number!(gen_number_3, 0.0, "0");
    test_number!(gen_number_4, -0.0, "0");
    test_number!(gen_number_5, -1.0, "-1");
    test_number!(gen_number_6, 0.1, "0.1");
    test_number!(gen_number_7, 12345678.125, "12345678.125");

    macro_rules! test_round {
        ($name:ident, $num:expr, $digits:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(round_to($num, $digits), $result);
            }
        )
    }

    test_round!(round_1, 1.2345678, 4, 1.2346);
    test_round!(round_2, 1.2345678, 2, 1.23);
    test_round!(round_3, 0.0000001, 4, 0.0);
    test_round!(round_4, -0.0001, 2, 0.0);
    test_round!(round_5, 80.000005, 3, 80.0);
    test_round!(round_6, 12.5, 0, 13.0);

    #[test]
    fn parse_number_1() {
        assert_eq!(parse_number("10"), Some(10.0));
        assert_eq!(parse_number(" -1.5e2 "), Some(-150.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1."), Some(1.0));
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn scan_number_1() {
        assert_eq!(scan_number("10 20", 0), Some((10.0, 2)));
        assert_eq!(scan_number("10 -20.5", 3), Some((-20.5, 8)));
        assert_eq!(scan_number("1e3)", 0), Some((1000.0, 3)));
        assert_eq!(scan_number("1em", 0), Some((1.0, 1)));
        assert_eq!(scan_number("-.5,", 0), Some((-0.5, 3)));
        assert_eq!(scan_number("-)", 0), None);
        assert_eq!(scan_number(".", 0), None);
        assert_eq!(scan_number("1e400", 0), None);
    }

    #[test]
    fn ratio_1() {
        assert_eq!(Ratio::accept("0.5", "opacity").unwrap(), Ratio::new(0.5));
        let r = Ratio::accept("50%", "opacity").unwrap();
        assert!(r.percent);
        assert_eq!(r.as_fraction(), 0.5);
        assert_eq!(r.to_string(), "50%");
        assert!(Ratio::accept("50 %", "opacity").is_err());
        assert!(Ratio::accept("half", "opacity").is_err());
    }
}
