// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::sync::OnceLock;

use regex::Regex;

use super::number::{round_to, split_list, write_num};
use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

const DEFAULT_FONT_SIZE: f64 = 16.0;

/// List of all SVG length units.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub enum LengthUnit {
    Em,
    Ex,
    Px,
    In,
    Cm,
    Mm,
    Pt,
    Pc,
    Percent,
}

impl LengthUnit {
    /// Parses a unit suffix.
    pub fn from_str(text: &str) -> Option<LengthUnit> {
        Some(match text {
            "em" => LengthUnit::Em,
            "ex" => LengthUnit::Ex,
            "px" => LengthUnit::Px,
            "in" => LengthUnit::In,
            "cm" => LengthUnit::Cm,
            "mm" => LengthUnit::Mm,
            "pt" => LengthUnit::Pt,
            "pc" => LengthUnit::Pc,
            "%" => LengthUnit::Percent,
            _ => return None,
        })
    }

    /// Returns the unit suffix.
    pub fn as_str(&self) -> &'static str {
        match *self {
            LengthUnit::Em => "em",
            LengthUnit::Ex => "ex",
            LengthUnit::Px => "px",
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
            LengthUnit::Percent => "%",
        }
    }

    // How many user units are in one unit. Percent depends on the viewport.
    fn factor(&self) -> Option<f64> {
        Some(match *self {
            LengthUnit::Em => DEFAULT_FONT_SIZE,
            LengthUnit::Ex => DEFAULT_FONT_SIZE / 2.0,
            LengthUnit::Px => 1.0,
            LengthUnit::In => 96.0,
            LengthUnit::Cm => 96.0 / 2.54,
            LengthUnit::Mm => 96.0 / 25.4,
            LengthUnit::Pt => 4.0 / 3.0,
            LengthUnit::Pc => 16.0,
            LengthUnit::Percent => return None,
        })
    }
}

fn length_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?(em|ex|px|in|cm|mm|pt|pc|%)?$")
            .expect("valid regex")
    })
}

/// Representation of the [`<length>`] type.
///
/// The attribute name the length was parsed from is kept, so percentages
/// can be resolved against the right viewport axis.
///
/// [`<length>`]: https://www.w3.org/TR/SVG/types.html#DataTypeLength
#[derive(Clone, PartialEq, Debug)]
pub struct Length {
    /// The number as written.
    pub value: f64,
    /// `None` means user units.
    pub unit: Option<LengthUnit>,
    /// The attribute this length belongs to.
    pub attr_name: String,
}

impl Length {
    /// Constructs a new length.
    pub fn new<S: Into<String>>(value: f64, unit: Option<LengthUnit>, attr_name: S) -> Length {
        Length {
            value,
            unit,
            attr_name: attr_name.into(),
        }
    }

    /// Constructs a new length in user units.
    pub fn new_number<S: Into<String>>(value: f64, attr_name: S) -> Length {
        Length::new(value, None, attr_name)
    }

    // Percentages of `x`-like attributes are relative to the viewport width,
    // `y`-like ones to the height and the rest to the normalized diagonal.
    fn percent_base(&self, viewport: (f64, f64)) -> f64 {
        let (w, h) = viewport;
        match self.attr_name.as_str() {
            "x" | "cx" | "dx" | "x1" | "x2" | "fx" | "rx" | "width" => w,
            "y" | "cy" | "dy" | "y1" | "y2" | "fy" | "ry" | "height" => h,
            _ => ((w * w + h * h) / 2.0).sqrt(),
        }
    }

    /// Converts the length into user units.
    pub fn to_user_units(&self, viewport: (f64, f64)) -> f64 {
        match self.unit {
            None => self.value,
            Some(LengthUnit::Percent) => self.value * self.percent_base(viewport) / 100.0,
            Some(unit) => self.value * unit.factor().unwrap_or(1.0),
        }
    }

    /// Sets the length from a value in user units, keeping the current unit.
    pub fn set_user_units(&mut self, value: f64, viewport: (f64, f64)) {
        self.value = match self.unit {
            None => value,
            Some(LengthUnit::Percent) => {
                let base = self.percent_base(viewport);
                if base == 0.0 {
                    0.0
                } else {
                    value * 100.0 / base
                }
            }
            Some(unit) => value / unit.factor().unwrap_or(1.0),
        };
    }
}

impl Accept for Length {
    fn accept(text: &str, attr: &str) -> Result<Self, ValueError> {
        let trimmed = text.trim();
        let caps = match length_regex().captures(trimmed) {
            Some(caps) => caps,
            None => return Err(ValueError::invalid("length", text)),
        };

        let unit = caps.get(3).and_then(|m| LengthUnit::from_str(m.as_str()));
        let number_end = caps.get(3).map(|m| m.start()).unwrap_or(trimmed.len());
        let value = trimmed[..number_end]
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| ValueError::invalid("length", text))?;

        Ok(Length::new(value, unit, attr))
    }
}

impl WriteBuffer for Length {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        write_num(self.value, buf);
        if let Some(unit) = self.unit {
            buf.extend_from_slice(unit.as_str().as_bytes());
        }
    }
}

impl FixPrecision for Length {
    fn fix_precision(&self, digits: u8) -> Self {
        Length {
            value: round_to(self.value, digits),
            unit: self.unit,
            attr_name: self.attr_name.clone(),
        }
    }
}

impl_display!(Length);

/// Representation of the `stroke-dasharray` value.
#[derive(Clone, PartialEq, Debug)]
pub enum Dasharray {
    /// The `none` keyword.
    None,
    /// A list of dash and gap lengths.
    Lengths(Vec<Length>),
}

impl Accept for Dasharray {
    fn accept(text: &str, attr: &str) -> Result<Self, ValueError> {
        if text.trim() == "none" {
            return Ok(Dasharray::None);
        }

        let list = split_list(text)
            .map(|s| Length::accept(s, attr))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ValueError::invalid("dash array", text))?;

        if list.is_empty() {
            return Err(ValueError::invalid("dash array", text));
        }

        Ok(Dasharray::Lengths(list))
    }
}

impl WriteBuffer for Dasharray {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        match *self {
            Dasharray::None => buf.extend_from_slice(b"none"),
            Dasharray::Lengths(ref list) => {
                for (i, len) in list.iter().enumerate() {
                    if i != 0 {
                        buf.push(b' ');
                    }
                    len.write_buf_opt(opt, buf);
                }
            }
        }
    }
}

impl FixPrecision for Dasharray {
    fn fix_precision(&self, digits: u8) -> Self {
        match *self {
            Dasharray::None => Dasharray::None,
            Dasharray::Lengths(ref list) => {
                Dasharray::Lengths(list.iter().map(|l| l.fix_precision(digits)).collect())
            }
        }
    }
}

impl_display!(Dasharray);
