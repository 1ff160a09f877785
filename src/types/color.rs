// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use super::number::{round_to, write_num};
use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

/// The notation a color was written in.
///
/// Used to write the color back in the same notation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ColorFormat {
    /// A color keyword, like `red`. The keyword is stored as written.
    Keyword(String),
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    Hex,
    /// `rgb()` or `rgba()`.
    Rgb,
    /// `hsl()` or `hsla()`.
    Hsl,
}

/// Representation of the [`<color>`] type.
///
/// [`<color>`]: https://www.w3.org/TR/css-color-3/
#[derive(Clone, PartialEq, Debug)]
pub struct Color {
    #[allow(missing_docs)]
    pub format: ColorFormat,
    #[allow(missing_docs)]
    pub red: u8,
    #[allow(missing_docs)]
    pub green: u8,
    #[allow(missing_docs)]
    pub blue: u8,
    /// Opacity in the 0..1 range.
    pub alpha: f64,
}

impl Color {
    /// Constructs a new opaque color written in the hex notation.
    #[inline]
    pub fn new(red: u8, green: u8, blue: u8) -> Color {
        Color::new_rgba(red, green, blue, 1.0)
    }

    /// Constructs a new color written in the hex notation.
    pub fn new_rgba(red: u8, green: u8, blue: u8, alpha: f64) -> Color {
        Color {
            format: ColorFormat::Hex,
            red,
            green,
            blue,
            alpha: alpha.max(0.0).min(1.0),
        }
    }

    /// Checks that both colors represent the same RGBA value,
    /// regardless of the notation.
    pub fn same_rgba(&self, other: &Color) -> bool {
        self.red == other.red
            && self.green == other.green
            && self.blue == other.blue
            && self.alpha == other.alpha
    }

    fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }
}

fn rgb_to_hsl(color: &Color) -> (f64, f64, f64) {
    let r = f64::from(color.red) / 255.0;
    let g = f64::from(color.green) / 255.0;
    let b = f64::from(color.blue) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;
    if d == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = d / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * (((g - b) / d) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / d + 2.0)
    } else {
        60.0 * ((r - g) / d + 4.0)
    };

    ((h + 360.0) % 360.0, s, l)
}

// The shortest decimal that maps back to the same alpha byte.
fn alpha_from_byte(alpha: u8) -> f64 {
    let byte = f64::from(alpha);
    for digits in 1..4 {
        let a = round_to(byte / 255.0, digits);
        if (a * 255.0).round() == byte {
            return a;
        }
    }

    byte / 255.0
}

fn detect_format(text: &str) -> ColorFormat {
    let lower = text.to_ascii_lowercase();
    if text.starts_with('#') {
        ColorFormat::Hex
    } else if lower.starts_with("rgb") {
        ColorFormat::Rgb
    } else if lower.starts_with("hsl") {
        ColorFormat::Hsl
    } else {
        ColorFormat::Keyword(text.to_string())
    }
}

fn decode(text: &str) -> Option<Color> {
    let c = svgtypes::Color::from_str(text).ok()?;
    Some(Color {
        format: detect_format(text),
        red: c.red,
        green: c.green,
        blue: c.blue,
        alpha: alpha_from_byte(c.alpha),
    })
}

impl Accept for Color {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        decode(text.trim()).ok_or_else(|| ValueError::invalid("color", text))
    }
}

static CHARS: &[u8] = b"0123456789abcdef";

#[inline]
fn write_hex_byte(n: u8, buf: &mut Vec<u8>) {
    buf.push(CHARS[(n >> 4) as usize]);
    buf.push(CHARS[(n & 0xf) as usize]);
}

fn write_hex(color: &Color, buf: &mut Vec<u8>) {
    buf.push(b'#');
    write_hex_byte(color.red, buf);
    write_hex_byte(color.green, buf);
    write_hex_byte(color.blue, buf);
    if !color.is_opaque() {
        write_hex_byte((color.alpha * 255.0).round() as u8, buf);
    }
}

impl WriteBuffer for Color {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        match self.format {
            ColorFormat::Keyword(ref name) => {
                // The keyword is kept only while it still describes the color.
                match decode(name) {
                    Some(ref c) if c.same_rgba(self) => buf.extend_from_slice(name.as_bytes()),
                    _ => write_hex(self, buf),
                }
            }
            ColorFormat::Hex => write_hex(self, buf),
            ColorFormat::Rgb => {
                let prefix: &[u8] = if self.is_opaque() { b"rgb(" } else { b"rgba(" };
                buf.extend_from_slice(prefix);
                buf.extend_from_slice(
                    format!("{}, {}, {}", self.red, self.green, self.blue).as_bytes(),
                );
                if !self.is_opaque() {
                    buf.extend_from_slice(b", ");
                    write_num(self.alpha, buf);
                }
                buf.push(b')');
            }
            ColorFormat::Hsl => {
                let (h, s, l) = rgb_to_hsl(self);
                let prefix: &[u8] = if self.is_opaque() { b"hsl(" } else { b"hsla(" };
                buf.extend_from_slice(prefix);
                write_num(round_to(h, 2), buf);
                buf.extend_from_slice(b", ");
                write_num(round_to(s * 100.0, 2), buf);
                buf.extend_from_slice(b"%, ");
                write_num(round_to(l * 100.0, 2), buf);
                buf.push(b'%');
                if !self.is_opaque() {
                    buf.extend_from_slice(b", ");
                    write_num(self.alpha, buf);
                }
                buf.push(b')');
            }
        }
    }
}

impl FixPrecision for Color {
    fn fix_precision(&self, digits: u8) -> Self {
        let mut c = self.clone();
        c.alpha = round_to(self.alpha, digits);
        c
    }
}

impl_display!(Color);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_color {
        ($name:ident, $text:expr, $r:expr, $g:expr, $b:expr, $a:expr, $result:expr) => (
            #[test]
            fn $name() {
                let c = Color::accept($text, "fill").unwrap();
                assert_eq!((c.red, c.green, c.blue), ($r, $g, $b));
                assert_eq!(c.alpha, $a);
                assert_eq!(c.to_string(), $result);
            }
        )
    }

    test_color!(parse_1, "red", 255, 0, 0, 1.0, "red");
    test_color!(parse_2, "#f00", 255, 0, 0, 1.0, "#ff0000");
    test_color!(parse_3, "#ff000080", 255, 0, 0, 0.5, "#ff000080");
    test_color!(parse_4, "rgb(10, 20, 30)", 10, 20, 30, 1.0, "rgb(10, 20, 30)");
    test_color!(parse_5, "rgba(10, 20, 30, 0.5)", 10, 20, 30, 0.5, "rgba(10, 20, 30, 0.5)");
    test_color!(parse_6, "hsl(0, 100%, 50%)", 255, 0, 0, 1.0, "hsl(0, 100%, 50%)");
    test_color!(parse_7, "hsl(120, 100%, 25%)", 0, 128, 0, 1.0, "hsl(120, 100%, 25.1%)");
    test_color!(parse_8, " #ABC ", 170, 187, 204, 1.0, "#aabbcc");
    test_color!(parse_9, "rgb(100%, 0%, 0%)", 255, 0, 0, 1.0, "rgb(255, 0, 0)");
    test_color!(parse_10, "#0000ff40", 0, 0, 255, 0.25, "#0000ff40");

    macro_rules! test_color_err {
        ($name:ident, $text:expr) => (
            #[test]
            fn $name() {
                assert!(Color::accept($text, "fill").is_err());
            }
        )
    }

    test_color_err!(parse_err_1, "#ff");
    test_color_err!(parse_err_2, "#ggg");
    test_color_err!(parse_err_3, "notacolor");
    test_color_err!(parse_err_4, "hsl(10, 20%)");
    test_color_err!(parse_err_6, "rgb(1, 2, 3) x");
    test_color_err!(parse_err_5, "");

    #[test]
    fn keyword_falls_back_to_hex() {
        let mut c = Color::accept("red", "fill").unwrap();
        c.green = 0x80;
        assert_eq!(c.to_string(), "#ff8000");
    }

    #[test]
    fn reparse_is_stable() {
        for text in &["blue", "#123456", "rgba(1, 2, 3, 0.25)", "hsl(200, 40%, 60%)"] {
            let c = Color::accept(text, "fill").unwrap();
            let again = Color::accept(&c.to_string(), "fill").unwrap();
            assert!(c.same_rgba(&again), "{}", text);
        }
    }
}
