// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::Color;
use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

/// Representation of the [`<FuncIRI>`] type, like `url(#grad)`.
///
/// [`<FuncIRI>`]: https://www.w3.org/TR/SVG/types.html#DataTypeFuncIRI
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FuncIri {
    /// The reference inside `url()`, like `#grad`.
    pub url: String,
}

impl FuncIri {
    /// Returns the referenced element id, if the reference is a local one.
    pub fn local_id(&self) -> Option<&str> {
        self.url.strip_prefix('#')
    }
}

impl Accept for FuncIri {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let inner = text
            .trim()
            .strip_prefix("url(")
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| ValueError::invalid("IRI", text))?;

        let url = inner.trim().trim_matches(|c| c == '\'' || c == '"');
        if url.is_empty() {
            return Err(ValueError::invalid("IRI", text));
        }

        Ok(FuncIri { url: url.to_string() })
    }
}

impl WriteBuffer for FuncIri {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        buf.extend_from_slice(b"url(");
        buf.extend_from_slice(self.url.as_bytes());
        buf.push(b')');
    }
}

impl_display!(FuncIri);

/// Representation of the [`<paint>`] type.
///
/// [`<paint>`]: https://www.w3.org/TR/SVG/painting.html#SpecifyingPaint
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Paint {
    None,
    CurrentColor,
    Inherit,
    Color(Color),
    Url(FuncIri),
}

impl Accept for Paint {
    fn accept(text: &str, attr: &str) -> Result<Self, ValueError> {
        let trimmed = text.trim();
        let paint = match trimmed {
            "none" => Paint::None,
            "currentColor" => Paint::CurrentColor,
            "inherit" => Paint::Inherit,
            _ if trimmed.starts_with("url(") => Paint::Url(FuncIri::accept(trimmed, attr)?),
            _ => match Color::accept(trimmed, attr) {
                Ok(c) => Paint::Color(c),
                Err(_) => return Err(ValueError::invalid("paint", text)),
            },
        };

        Ok(paint)
    }
}

impl WriteBuffer for Paint {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        match *self {
            Paint::None => buf.extend_from_slice(b"none"),
            Paint::CurrentColor => buf.extend_from_slice(b"currentColor"),
            Paint::Inherit => buf.extend_from_slice(b"inherit"),
            Paint::Color(ref c) => c.write_buf_opt(opt, buf),
            Paint::Url(ref iri) => iri.write_buf_opt(opt, buf),
        }
    }
}

impl FixPrecision for Paint {
    fn fix_precision(&self, digits: u8) -> Self {
        match *self {
            Paint::Color(ref c) => Paint::Color(c.fix_precision(digits)),
            ref p => p.clone(),
        }
    }
}

impl_display!(Paint);

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_paint {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(Paint::accept($text, "fill").unwrap(), $result);
            }
        )
    }

    test_paint!(parse_1, "none", Paint::None);
    test_paint!(parse_2, " currentColor ", Paint::CurrentColor);
    test_paint!(parse_3, "inherit", Paint::Inherit);
    test_paint!(parse_4, "url(#lg1)", Paint::Url(FuncIri { url: "#lg1".to_string() }));
    test_paint!(parse_5, "url('#lg1')", Paint::Url(FuncIri { url: "#lg1".to_string() }));
    test_paint!(parse_6, "#00ff00", Paint::Color(Color::new(0, 255, 0)));

    #[test]
    fn parse_err_1() {
        assert!(Paint::accept("url()", "fill").is_err());
        assert!(Paint::accept("redd", "fill").is_err());
        assert!(Paint::accept("", "fill").is_err());
    }

    #[test]
    fn write_1() {
        assert_eq!(Paint::accept("url( #a )", "fill").unwrap().to_string(), "url(#a)");
        assert_eq!(Paint::accept("red", "fill").unwrap().to_string(), "red");
        assert_eq!(
            Paint::accept("url(#a)", "fill").unwrap(),
            Paint::Url(FuncIri { url: "#a".to_string() })
        );
    }

    #[test]
    fn local_id() {
        let iri = FuncIri::accept("url(#g)", "fill").unwrap();
        assert_eq!(iri.local_id(), Some("g"));
    }
}
