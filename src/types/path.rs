// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use svgtypes::PathParser;
use svgtypes::PathSegment as ParserSegment;

use super::number::{round_to, write_num};
use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

/// A single path command with its numeric arguments.
///
/// Arc flags are stored as `0` or `1`.
#[derive(Clone, PartialEq, Debug)]
pub struct PathSegment {
    /// A path command letter, like `M` or `c`. Lowercase means relative.
    pub command: char,
    #[allow(missing_docs)]
    pub args: Vec<f64>,
}

impl PathSegment {
    /// Constructs a new segment.
    pub fn new(command: char, args: Vec<f64>) -> Self {
        PathSegment { command, args }
    }

    /// Checks that the segment uses absolute coordinates.
    pub fn is_absolute(&self) -> bool {
        self.command.is_ascii_uppercase()
    }
}

fn letter(abs: bool, c: char) -> char {
    if abs {
        c
    } else {
        c.to_ascii_lowercase()
    }
}

fn flag(f: bool) -> f64 {
    if f {
        1.0
    } else {
        0.0
    }
}

impl From<ParserSegment> for PathSegment {
    fn from(seg: ParserSegment) -> Self {
        match seg {
            ParserSegment::MoveTo { abs, x, y } => PathSegment::new(letter(abs, 'M'), vec![x, y]),
            ParserSegment::LineTo { abs, x, y } => PathSegment::new(letter(abs, 'L'), vec![x, y]),
            ParserSegment::HorizontalLineTo { abs, x } => {
                PathSegment::new(letter(abs, 'H'), vec![x])
            }
            ParserSegment::VerticalLineTo { abs, y } => {
                PathSegment::new(letter(abs, 'V'), vec![y])
            }
            ParserSegment::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                PathSegment::new(letter(abs, 'C'), vec![x1, y1, x2, y2, x, y])
            }
            ParserSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                PathSegment::new(letter(abs, 'S'), vec![x2, y2, x, y])
            }
            ParserSegment::Quadratic { abs, x1, y1, x, y } => {
                PathSegment::new(letter(abs, 'Q'), vec![x1, y1, x, y])
            }
            ParserSegment::SmoothQuadratic { abs, x, y } => {
                PathSegment::new(letter(abs, 'T'), vec![x, y])
            }
            ParserSegment::EllipticalArc { abs, rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                PathSegment::new(
                    letter(abs, 'A'),
                    vec![rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y],
                )
            }
            ParserSegment::ClosePath { abs } => PathSegment::new(letter(abs, 'Z'), Vec::new()),
        }
    }
}

/// Representation of the path data, aka the `d` attribute.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct PathCommands(pub Vec<PathSegment>);

impl PathCommands {
    /// Constructs a new, empty path.
    pub fn new() -> Self {
        PathCommands::default()
    }
}

impl Accept for PathCommands {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let mut segments = Vec::new();
        for seg in PathParser::from(text) {
            let seg = PathSegment::from(seg.map_err(|e| ValueError::InvalidPath(e.to_string()))?);
            if !seg.args.iter().all(|n| n.is_finite()) {
                return Err(ValueError::InvalidPath(format!("'{}' contains a non-finite number", text)));
            }
            segments.push(seg);
        }

        Ok(PathCommands(segments))
    }
}

impl WriteBuffer for PathCommands {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        for (i, seg) in self.0.iter().enumerate() {
            if i != 0 {
                buf.push(b' ');
            }

            let mut tmp = [0u8; 4];
            buf.extend_from_slice(seg.command.encode_utf8(&mut tmp).as_bytes());
            for (j, n) in seg.args.iter().enumerate() {
                if j != 0 {
                    buf.push(b' ');
                }
                write_num(*n, buf);
            }
        }
    }
}

impl FixPrecision for PathCommands {
    fn fix_precision(&self, digits: u8) -> Self {
        let segments = self
            .0
            .iter()
            .map(|seg| PathSegment {
                command: seg.command,
                args: seg.args.iter().map(|n| round_to(*n, digits)).collect(),
            })
            .collect();

        PathCommands(segments)
    }
}

impl_display!(PathCommands);
