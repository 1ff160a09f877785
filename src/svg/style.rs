// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;

use super::attrs::{AttrRecord, PresentationAttrs};
use crate::{Accept, FixPrecision, Interval, ValueError, Warning, WriteBuffer, WriteOptions};

/// A parsed inline `style` attribute.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Style {
    /// Recognized declarations.
    pub presentation: PresentationAttrs,
    /// Declarations that are not presentation attributes, in the source order.
    pub unknown: IndexMap<String, String>,
}

impl Style {
    /// Checks that the style has no declarations.
    pub fn is_empty(&self) -> bool {
        self.presentation == PresentationAttrs::default() && self.unknown.is_empty()
    }
}

// Returns the trimmed sub-slice of `text[start..end]` as an absolute range.
fn trimmed_range(text: &str, start: usize, end: usize) -> (usize, usize) {
    let s = &text[start..end];
    let lead = s.len() - s.trim_start().len();
    let trail = s.len() - s.trim_end().len();
    if lead == s.len() {
        (start, start)
    } else {
        (start + lead, end - trail)
    }
}

impl Accept for Style {
    fn accept(text: &str, attr: &str) -> Result<Self, ValueError> {
        let mut warns = Vec::new();
        Self::accept_reporting(text, attr, Interval::empty(0), &mut warns)
    }

    /// Never fails. Broken declarations are reported and skipped.
    fn accept_reporting(
        text: &str,
        _: &str,
        interval: Interval,
        warns: &mut Vec<Warning>,
    ) -> Result<Self, ValueError> {
        // Offsets inside `text` are mapped onto the source only when
        // the value wasn't changed by unescaping.
        let sub_interval = |start: usize, end: usize| {
            if interval.len() == text.len() {
                Interval::new(interval.start + start, interval.start + end)
            } else {
                interval
            }
        };

        let mut style = Style::default();
        let mut offset = 0;
        for segment in text.split(';') {
            let seg_start = offset;
            let seg_end = offset + segment.len();
            offset = seg_end + 1;

            if segment.trim().is_empty() {
                continue;
            }

            let colon = match segment.find(':') {
                Some(pos) => seg_start + pos,
                None => {
                    let (s, e) = trimmed_range(text, seg_start, seg_end);
                    let msg = format!("invalid style declaration '{}'", &text[s..e]);
                    warn!("{}.", msg);
                    warns.push(Warning::new(sub_interval(s, e), msg));
                    continue;
                }
            };

            let (ns, ne) = trimmed_range(text, seg_start, colon);
            let (vs, ve) = trimmed_range(text, colon + 1, seg_end);
            let name = &text[ns..ne];
            let value = &text[vs..ve];

            match style.presentation.assign(name, value) {
                Some(Ok(())) => {}
                Some(Err(e)) => {
                    let msg = format!("invalid '{}' style: {}", name, e);
                    warn!("{}.", msg);
                    warns.push(Warning::new(sub_interval(vs, ve), msg));
                }
                None => {
                    style.unknown.insert(name.to_string(), value.to_string());
                }
            }
        }

        Ok(style)
    }
}

impl WriteBuffer for Style {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        let mut values = Vec::new();
        self.presentation.collect(&mut values);

        let mut first = true;
        let mut push_decl = |name: &str, buf: &mut Vec<u8>| {
            if !first {
                buf.push(b';');
            }
            first = false;
            buf.extend_from_slice(name.as_bytes());
            buf.push(b':');
        };

        for (name, value) in &values {
            push_decl(*name, buf);
            value.write_buf_opt(opt, buf);
        }

        for (name, value) in &self.unknown {
            push_decl(name.as_str(), buf);
            buf.extend_from_slice(value.as_bytes());
        }
    }
}

impl FixPrecision for Style {
    fn fix_precision(&self, digits: u8) -> Self {
        Style {
            presentation: self.presentation.fix_precision(digits),
            unknown: self.unknown.clone(),
        }
    }
}

impl_display!(Style);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Length, Paint};

    #[test]
    fn parse_1() {
        let style = Style::accept("fill:red; stroke-width: 2 ;", "style").unwrap();
        assert_eq!(style.presentation.fill, Paint::accept("red", "fill").ok());
        assert_eq!(
            style.presentation.stroke_width,
            Some(Length::new(2.0, None, "stroke-width"))
        );
        assert!(style.unknown.is_empty());
    }

    #[test]
    fn parse_unknown() {
        let style = Style::accept("fill:red;mix-blend-mode:multiply", "style").unwrap();
        assert_eq!(style.unknown["mix-blend-mode"], "multiply");
        assert_eq!(style.to_string(), "fill:red;mix-blend-mode:multiply");
    }

    #[test]
    fn invalid_value_is_dropped() {
        // style="fill:red;stroke-width:wide"
        let text = "fill:red;stroke-width:wide";
        let mut warns = Vec::new();
        let style = Style::accept_reporting(text, "style", Interval::new(10, 36), &mut warns).unwrap();
        assert!(style.presentation.stroke_width.is_none());
        assert!(style.unknown.is_empty());
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].interval, Interval::new(32, 36));
    }

    #[test]
    fn missing_colon() {
        let mut warns = Vec::new();
        let style = Style::accept_reporting("fill", "style", Interval::new(0, 4), &mut warns).unwrap();
        assert!(style.is_empty());
        assert_eq!(warns.len(), 1);
    }

    #[test]
    fn write_1() {
        let style = Style::accept("stroke:blue;fill:#ff0000", "style").unwrap();
        // record order
        assert_eq!(style.to_string(), "fill:#ff0000;stroke:blue");
    }
}
