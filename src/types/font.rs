// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::Length;
use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

/// Representation of the `font-family` value: an ordered list of names.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FontFamily(pub Vec<String>);

impl Accept for FontFamily {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let mut names = Vec::new();
        for name in text.split(',') {
            let name = name.trim();
            let unquoted = name
                .strip_prefix('\'')
                .and_then(|n| n.strip_suffix('\''))
                .or_else(|| name.strip_prefix('"').and_then(|n| n.strip_suffix('"')))
                .unwrap_or(name);

            if unquoted.is_empty() {
                return Err(ValueError::invalid("font family", text));
            }

            names.push(unquoted.to_string());
        }

        Ok(FontFamily(names))
    }
}

impl WriteBuffer for FontFamily {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        for (i, name) in self.0.iter().enumerate() {
            if i != 0 {
                buf.extend_from_slice(b", ");
            }

            if name.contains(char::is_whitespace) {
                buf.push(b'\'');
                buf.extend_from_slice(name.as_bytes());
                buf.push(b'\'');
            } else {
                buf.extend_from_slice(name.as_bytes());
            }
        }
    }
}

impl FixPrecision for FontFamily {
    fn fix_precision(&self, _: u8) -> Self {
        self.clone()
    }
}

impl_display!(FontFamily);

static FONT_SIZE_KEYWORDS: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large",
    "larger", "smaller", "inherit",
];

/// Representation of the `font-size` value.
#[derive(Clone, PartialEq, Debug)]
pub enum FontSize {
    #[allow(missing_docs)]
    Length(Length),
    /// An absolute or relative size keyword, like `small` or `larger`.
    Keyword(String),
}

impl Accept for FontSize {
    fn accept(text: &str, attr: &str) -> Result<Self, ValueError> {
        let trimmed = text.trim();
        if FONT_SIZE_KEYWORDS.contains(&trimmed) {
            return Ok(FontSize::Keyword(trimmed.to_string()));
        }

        Length::accept(trimmed, attr)
            .map(FontSize::Length)
            .map_err(|_| ValueError::invalid("font size", text))
    }
}

impl WriteBuffer for FontSize {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        match *self {
            FontSize::Length(ref len) => len.write_buf_opt(opt, buf),
            FontSize::Keyword(ref k) => buf.extend_from_slice(k.as_bytes()),
        }
    }
}

impl FixPrecision for FontSize {
    fn fix_precision(&self, digits: u8) -> Self {
        match *self {
            FontSize::Length(ref len) => FontSize::Length(len.fix_precision(digits)),
            FontSize::Keyword(ref k) => FontSize::Keyword(k.clone()),
        }
    }
}

impl_display!(FontSize);

/// Representation of the `font-weight` value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum FontWeight {
    Normal,
    Bold,
    Bolder,
    Lighter,
    Inherit,
    /// One of `100`, `200`, ..., `900`.
    Number(u16),
}

impl Accept for FontWeight {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let weight = match text.trim() {
            "normal" => FontWeight::Normal,
            "bold" => FontWeight::Bold,
            "bolder" => FontWeight::Bolder,
            "lighter" => FontWeight::Lighter,
            "inherit" => FontWeight::Inherit,
            s => match s.parse::<u16>() {
                Ok(n) if n % 100 == 0 && (100..=900).contains(&n) => FontWeight::Number(n),
                _ => return Err(ValueError::invalid("font weight", text)),
            },
        };

        Ok(weight)
    }
}

impl WriteBuffer for FontWeight {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        let s = match *self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::Bolder => "bolder",
            FontWeight::Lighter => "lighter",
            FontWeight::Inherit => "inherit",
            FontWeight::Number(n) => {
                buf.extend_from_slice(n.to_string().as_bytes());
                return;
            }
        };

        buf.extend_from_slice(s.as_bytes());
    }
}

impl FixPrecision for FontWeight {
    fn fix_precision(&self, _: u8) -> Self {
        *self
    }
}

impl_display!(FontWeight);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LengthUnit;

    #[test]
    fn family_1() {
        let f = FontFamily::accept("'Times New Roman', serif", "font-family").unwrap();
        assert_eq!(f.0, vec!["Times New Roman".to_string(), "serif".to_string()]);
        assert_eq!(f.to_string(), "'Times New Roman', serif");
    }

    #[test]
    fn family_2() {
        let f = FontFamily::accept("\"Arial\"", "font-family").unwrap();
        assert_eq!(f.to_string(), "Arial");
        assert!(FontFamily::accept("Arial,", "font-family").is_err());
    }

    #[test]
    fn size_1() {
        assert_eq!(
            FontSize::accept("12pt", "font-size").unwrap(),
            FontSize::Length(Length::new(12.0, Some(LengthUnit::Pt), "font-size"))
        );
        assert_eq!(
            FontSize::accept("x-large", "font-size").unwrap(),
            FontSize::Keyword("x-large".to_string())
        );
        assert!(FontSize::accept("huge", "font-size").is_err());
    }

    macro_rules! test_weight {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(FontWeight::accept($text, "font-weight").ok(), $result);
            }
        )
    }

    test_weight!(weight_1, "bold", Some(FontWeight::Bold));
    test_weight!(weight_2, "700", Some(FontWeight::Number(700)));
    test_weight!(weight_3, "750", None);
    test_weight!(weight_4, "1000", None);
    test_weight!(weight_5, "heavy", None);
}
