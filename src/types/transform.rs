// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Transform descriptors and the 2D affine matrix algebra behind them.

use std::ops::Mul;

use super::number::{round_to, scan_number, write_num};
use crate::{Accept, FixPrecision, ValueError, WriteBuffer, WriteOptions};

/// A 2D affine matrix, `(a b c d e f)` as in the SVG `matrix()` transform.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Matrix {
    /// Constructs a new matrix.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Matrix {
        Matrix { a, b, c, d, e, f }
    }

    /// Returns `true` for the identity matrix, aka (1 0 0 1 0 0).
    pub fn is_identity(&self) -> bool {
        *self == Matrix::default()
    }

    /// Returns `self × other`, which applies `other` first.
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Transforms a point.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Returns the inverse matrix, unless the matrix is singular.
    pub fn inverse(&self) -> Option<Matrix> {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        Some(Matrix {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }

    /// Compares matrices with an absolute tolerance.
    pub fn fuzzy_eq(&self, other: &Matrix, epsilon: f64) -> bool {
        let lhs = [self.a, self.b, self.c, self.d, self.e, self.f];
        let rhs = [other.a, other.b, other.c, other.d, other.e, other.f];
        lhs.iter().zip(rhs.iter()).all(|(l, r)| (l - r).abs() <= epsilon)
    }
}

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        self.multiply(&other)
    }
}

/// One primitive transform operation.
///
/// Angles are in degrees.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Descriptor {
    Matrix(Matrix),
    Translate { tx: f64, ty: f64 },
    Scale { sx: f64, sy: f64 },
    Rotate { angle: f64, cx: f64, cy: f64 },
    SkewX { angle: f64 },
    SkewY { angle: f64 },
}

impl Descriptor {
    /// Converts the descriptor into an equivalent matrix.
    pub fn to_matrix(&self) -> Matrix {
        match *self {
            Descriptor::Matrix(m) => m,
            Descriptor::Translate { tx, ty } => Matrix::new(1.0, 0.0, 0.0, 1.0, tx, ty),
            Descriptor::Scale { sx, sy } => Matrix::new(sx, 0.0, 0.0, sy, 0.0, 0.0),
            Descriptor::Rotate { angle, cx, cy } => {
                let (sin, cos) = angle.to_radians().sin_cos();
                Matrix::new(
                    cos,
                    sin,
                    -sin,
                    cos,
                    cx - cos * cx + sin * cy,
                    cy - sin * cx - cos * cy,
                )
            }
            Descriptor::SkewX { angle } => {
                Matrix::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0)
            }
            Descriptor::SkewY { angle } => {
                Matrix::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
            }
        }
    }

    fn name(&self) -> &'static str {
        match *self {
            Descriptor::Matrix(_) => "matrix",
            Descriptor::Translate { .. } => "translate",
            Descriptor::Scale { .. } => "scale",
            Descriptor::Rotate { .. } => "rotate",
            Descriptor::SkewX { .. } => "skewX",
            Descriptor::SkewY { .. } => "skewY",
        }
    }
}

fn skew_sum(a: f64, b: f64) -> f64 {
    (a.to_radians().tan() + b.to_radians().tan()).atan().to_degrees()
}

/// Fuses two adjacent descriptors into one, when it can be done analytically.
///
/// The result is equivalent to applying `right` first and `left` second,
/// same as `left right` in a transform list. Returns `None` when the
/// descriptors can't be fused.
///
/// A rotation merges only with a rotation around exactly the same pivot.
/// When `always_merge_if_left_is_matrix` is set, a `left` matrix absorbs
/// any `right` descriptor.
pub fn merge(left: &Descriptor, right: &Descriptor, always_merge_if_left_is_matrix: bool)
    -> Option<Descriptor>
{
    use self::Descriptor as D;

    let d = match (*left, *right) {
        (D::Translate { tx: x1, ty: y1 }, D::Translate { tx: x2, ty: y2 }) => {
            D::Translate { tx: x1 + x2, ty: y1 + y2 }
        }
        (D::Scale { sx: x1, sy: y1 }, D::Scale { sx: x2, sy: y2 }) => {
            D::Scale { sx: x1 * x2, sy: y1 * y2 }
        }
        (D::Rotate { angle: a1, cx: cx1, cy: cy1 }, D::Rotate { angle: a2, cx: cx2, cy: cy2 })
            if cx1 == cx2 && cy1 == cy2 =>
        {
            D::Rotate { angle: a1 + a2, cx: cx1, cy: cy1 }
        }
        (D::SkewX { angle: a1 }, D::SkewX { angle: a2 }) => D::SkewX { angle: skew_sum(a1, a2) },
        (D::SkewY { angle: a1 }, D::SkewY { angle: a2 }) => D::SkewY { angle: skew_sum(a1, a2) },
        (D::Matrix(m1), D::Matrix(m2)) => D::Matrix(m1 * m2),
        (D::Matrix(m1), r) if always_merge_if_left_is_matrix => D::Matrix(m1 * r.to_matrix()),
        _ => return None,
    };

    Some(d)
}

/// Fuses two descriptors, falling back to a matrix composition.
pub fn compose(left: &Descriptor, right: &Descriptor) -> Descriptor {
    match merge(left, right, true) {
        Some(d) => d,
        None => Descriptor::Matrix(left.to_matrix() * right.to_matrix()),
    }
}

/// Representation of the [`<transform-list>`] type.
///
/// Each descriptor is stored with its precomputed matrix.
/// Both lists always have the same length and order.
///
/// [`<transform-list>`]: https://www.w3.org/TR/SVG/coords.html#TransformAttribute
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Transform {
    descriptors: Vec<Descriptor>,
    matrices: Vec<Matrix>,
}

impl Transform {
    /// Constructs a new, empty transform.
    pub fn new() -> Transform {
        Transform::default()
    }

    /// Constructs a transform from descriptors, without merging them.
    pub fn from_descriptors(descriptors: Vec<Descriptor>) -> Transform {
        let matrices = descriptors.iter().map(Descriptor::to_matrix).collect();
        Transform { descriptors, matrices }
    }

    #[allow(missing_docs)]
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    #[allow(missing_docs)]
    pub fn matrices(&self) -> &[Matrix] {
        &self.matrices
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Appends a descriptor, merging it into the last one when possible.
    pub fn append(&mut self, d: Descriptor) {
        let merged = self.descriptors.last().and_then(|last| merge(last, &d, false));
        match merged {
            Some(m) => {
                let idx = self.descriptors.len() - 1;
                self.descriptors[idx] = m;
                self.matrices[idx] = m.to_matrix();
            }
            None => {
                self.descriptors.push(d);
                self.matrices.push(d.to_matrix());
            }
        }
    }

    /// Prepends a descriptor, merging it into the first one when possible.
    pub fn append_left(&mut self, d: Descriptor) {
        let merged = self.descriptors.first().and_then(|first| merge(&d, first, false));
        match merged {
            Some(m) => {
                self.descriptors[0] = m;
                self.matrices[0] = m.to_matrix();
            }
            None => {
                self.descriptors.insert(0, d);
                self.matrices.insert(0, d.to_matrix());
            }
        }
    }

    /// Returns a copy with all mergeable neighbours fused.
    pub fn merged(&self) -> Transform {
        let mut ts = Transform::new();
        for d in &self.descriptors {
            ts.append(*d);
        }
        ts
    }

    /// Returns the composed matrix of the whole list.
    pub fn matrix(&self) -> Matrix {
        self.matrices.iter().fold(Matrix::default(), |acc, m| acc * *m)
    }
}

struct TransformParser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TransformParser<'a> {
    fn skip_separators(&mut self, allow_comma: bool) {
        let bytes = self.text.as_bytes();
        while let Some(&c) = bytes.get(self.pos) {
            if c.is_ascii_whitespace() || (allow_comma && c == b',') {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn error(&self, msg: &str) -> ValueError {
        ValueError::InvalidTransform(format!("{} at position {}", msg, self.pos))
    }

    fn parse_name(&mut self) -> &'a str {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        while matches!(bytes.get(self.pos), Some(c) if c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    fn parse_args(&mut self) -> Result<Vec<f64>, ValueError> {
        self.skip_separators(false);
        if self.text.as_bytes().get(self.pos) != Some(&b'(') {
            return Err(self.error("expected '('"));
        }
        self.pos += 1;

        let mut args = Vec::new();
        loop {
            self.skip_separators(false);
            match self.text.as_bytes().get(self.pos) {
                Some(b')') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(self.error("unexpected end of data")),
                _ => {}
            }

            if !args.is_empty() {
                if self.text.as_bytes().get(self.pos) == Some(&b',') {
                    self.pos += 1;
                    self.skip_separators(false);
                }
            }

            match scan_number(self.text, self.pos) {
                Some((n, end)) => {
                    args.push(n);
                    self.pos = end;
                }
                None => return Err(self.error("expected a number")),
            }
        }

        Ok(args)
    }

    fn parse_descriptor(&mut self) -> Result<Descriptor, ValueError> {
        let start = self.pos;
        let name = self.parse_name();
        let args = self.parse_args()?;

        let count_error = |expected: &str| {
            ValueError::InvalidTransform(format!(
                "{} expects {} arguments, found {} at position {}",
                name, expected, args.len(), start
            ))
        };

        let d = match (name, args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Descriptor::Matrix(Matrix::new(a, b, c, d, e, f)),
            ("matrix", _) => return Err(count_error("6")),
            ("translate", &[tx]) => Descriptor::Translate { tx, ty: 0.0 },
            ("translate", &[tx, ty]) => Descriptor::Translate { tx, ty },
            ("translate", _) => return Err(count_error("1 or 2")),
            ("scale", &[sx]) => Descriptor::Scale { sx, sy: sx },
            ("scale", &[sx, sy]) => Descriptor::Scale { sx, sy },
            ("scale", _) => return Err(count_error("1 or 2")),
            ("rotate", &[angle]) => Descriptor::Rotate { angle, cx: 0.0, cy: 0.0 },
            ("rotate", &[angle, cx, cy]) => Descriptor::Rotate { angle, cx, cy },
            ("rotate", _) => return Err(count_error("1 or 3")),
            ("skewX", &[angle]) => Descriptor::SkewX { angle },
            ("skewX", _) => return Err(count_error("1")),
            ("skewY", &[angle]) => Descriptor::SkewY { angle },
            ("skewY", _) => return Err(count_error("1")),
            _ => {
                return Err(ValueError::InvalidTransform(format!(
                    "unknown transform '{}' at position {}",
                    name, start
                )))
            }
        };

        Ok(d)
    }
}

impl Accept for Transform {
    fn accept(text: &str, _: &str) -> Result<Self, ValueError> {
        let mut p = TransformParser { text, pos: 0 };
        let mut descriptors = Vec::new();

        loop {
            p.skip_separators(!descriptors.is_empty());
            if p.pos >= text.len() {
                break;
            }

            descriptors.push(p.parse_descriptor()?);
        }

        Ok(Transform::from_descriptors(descriptors))
    }
}

fn write_args(name: &str, args: &[f64], buf: &mut Vec<u8>) {
    buf.extend_from_slice(name.as_bytes());
    buf.push(b'(');
    for (i, n) in args.iter().enumerate() {
        if i != 0 {
            buf.push(b' ');
        }
        write_num(*n, buf);
    }
    buf.push(b')');
}

impl WriteBuffer for Descriptor {
    fn write_buf_opt(&self, _: &WriteOptions, buf: &mut Vec<u8>) {
        let name = self.name();
        match *self {
            Descriptor::Matrix(m) => write_args(name, &[m.a, m.b, m.c, m.d, m.e, m.f], buf),
            Descriptor::Translate { tx, ty } if ty == 0.0 => write_args(name, &[tx], buf),
            Descriptor::Translate { tx, ty } => write_args(name, &[tx, ty], buf),
            Descriptor::Scale { sx, sy } if sx == sy => write_args(name, &[sx], buf),
            Descriptor::Scale { sx, sy } => write_args(name, &[sx, sy], buf),
            Descriptor::Rotate { angle, cx, cy } if cx == 0.0 && cy == 0.0 => {
                write_args(name, &[angle], buf)
            }
            Descriptor::Rotate { angle, cx, cy } => write_args(name, &[angle, cx, cy], buf),
            Descriptor::SkewX { angle } | Descriptor::SkewY { angle } => {
                write_args(name, &[angle], buf)
            }
        }
    }
}

impl WriteBuffer for Transform {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        for (i, d) in self.descriptors.iter().enumerate() {
            if i != 0 {
                buf.push(b' ');
            }
            d.write_buf_opt(opt, buf);
        }
    }
}

impl FixPrecision for Descriptor {
    fn fix_precision(&self, digits: u8) -> Self {
        let r = |n: f64| round_to(n, digits);
        match *self {
            Descriptor::Matrix(m) => {
                Descriptor::Matrix(Matrix::new(r(m.a), r(m.b), r(m.c), r(m.d), r(m.e), r(m.f)))
            }
            Descriptor::Translate { tx, ty } => Descriptor::Translate { tx: r(tx), ty: r(ty) },
            Descriptor::Scale { sx, sy } => Descriptor::Scale { sx: r(sx), sy: r(sy) },
            Descriptor::Rotate { angle, cx, cy } => {
                Descriptor::Rotate { angle: r(angle), cx: r(cx), cy: r(cy) }
            }
            Descriptor::SkewX { angle } => Descriptor::SkewX { angle: r(angle) },
            Descriptor::SkewY { angle } => Descriptor::SkewY { angle: r(angle) },
        }
    }
}

impl FixPrecision for Transform {
    fn fix_precision(&self, digits: u8) -> Self {
        Transform::from_descriptors(
            self.descriptors.iter().map(|d| d.fix_precision(digits)).collect(),
        )
    }
}

impl_display!(Descriptor);
impl_display!(Transform);

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ts(text: &str) -> Transform {
        Transform::accept(text, "transform").unwrap()
    }

    macro_rules! test_ts {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(ts($text).to_string(), $result);
            }
        )
    }

    test_ts!(write_1, "", "");
    test_ts!(write_2, "translate(10 20)", "translate(10 20)");
    test_ts!(write_3, "translate(10, 0)", "translate(10)");
    test_ts!(write_4, "scale(2,2)", "scale(2)");
    test_ts!(write_5, "rotate(45 10 20)", "rotate(45 10 20)");
    test_ts!(write_6, "rotate(45,0,0)", "rotate(45)");
    test_ts!(write_7, "matrix(1 0 0 1 5 6) , skewX(30)", "matrix(1 0 0 1 5 6) skewX(30)");
    test_ts!(write_8, " translate(1)scale(2) ", "translate(1) scale(2)");

    macro_rules! test_ts_err {
        ($name:ident, $text:expr) => (
            #[test]
            fn $name() {
                match Transform::accept($text, "transform") {
                    Err(ValueError::InvalidTransform(_)) => {}
                    r => panic!("unexpected result: {:?}", r),
                }
            }
        )
    }

    test_ts_err!(parse_err_1, "rotate(1 2)");
    test_ts_err!(parse_err_2, "matrix(1 2 3)");
    test_ts_err!(parse_err_3, "translate(10");
    test_ts_err!(parse_err_4, "foo(1)");
    test_ts_err!(parse_err_5, "scale(a)");
    test_ts_err!(parse_err_6, ", scale(2)");

    #[test]
    fn parallel_lists() {
        let t = ts("translate(10) rotate(90) scale(2 3)");
        assert_eq!(t.descriptors().len(), 3);
        assert_eq!(t.matrices().len(), 3);
        assert_eq!(t.matrices()[2], Matrix::new(2.0, 0.0, 0.0, 3.0, 0.0, 0.0));
    }

    #[test]
    fn rotate_around_pivot() {
        let m = Descriptor::Rotate { angle: 90.0, cx: 10.0, cy: 10.0 }.to_matrix();
        let (x, y) = m.apply(20.0, 10.0);
        assert!((x - 10.0).abs() < EPS);
        assert!((y - 20.0).abs() < EPS);
    }

    #[test]
    fn merge_same_kind() {
        use super::Descriptor::{Rotate, Scale, Translate};

        assert_eq!(
            merge(&Translate { tx: 1.0, ty: 2.0 }, &Translate { tx: 3.0, ty: 4.0 }, false),
            Some(Translate { tx: 4.0, ty: 6.0 })
        );
        assert_eq!(
            merge(&Scale { sx: 2.0, sy: 3.0 }, &Scale { sx: 4.0, sy: 5.0 }, false),
            Some(Scale { sx: 8.0, sy: 15.0 })
        );
        assert_eq!(
            merge(&Rotate { angle: 10.0, cx: 1.0, cy: 1.0 },
                  &Rotate { angle: 20.0, cx: 1.0, cy: 1.0 }, false),
            Some(Rotate { angle: 30.0, cx: 1.0, cy: 1.0 })
        );
    }

    #[test]
    fn merge_rotate_needs_equal_pivot() {
        let a = Descriptor::Rotate { angle: 10.0, cx: 1.0, cy: 1.0 };
        let b = Descriptor::Rotate { angle: 20.0, cx: 1.0 + 1e-12, cy: 1.0 };
        assert_eq!(merge(&a, &b, false), None);
    }

    #[test]
    fn merge_skew() {
        let m = merge(&Descriptor::SkewX { angle: 45.0 }, &Descriptor::SkewX { angle: 45.0 }, false);
        match m {
            Some(Descriptor::SkewX { angle }) => assert!((angle - 2f64.atan().to_degrees()).abs() < EPS),
            _ => panic!("skews should merge"),
        }
    }

    #[test]
    fn merge_matrix_flag() {
        let left = Descriptor::Matrix(Matrix::new(2.0, 0.0, 0.0, 2.0, 0.0, 0.0));
        let right = Descriptor::Translate { tx: 5.0, ty: 0.0 };
        assert_eq!(merge(&left, &right, false), None);
        assert_eq!(
            merge(&left, &right, true),
            Some(Descriptor::Matrix(Matrix::new(2.0, 0.0, 0.0, 2.0, 10.0, 0.0)))
        );
    }

    #[test]
    fn compose_falls_back_to_matrix() {
        let left = Descriptor::Translate { tx: 5.0, ty: 0.0 };
        let right = Descriptor::Scale { sx: 2.0, sy: 2.0 };
        assert_eq!(
            compose(&left, &right),
            Descriptor::Matrix(Matrix::new(2.0, 0.0, 0.0, 2.0, 5.0, 0.0))
        );
    }

    #[test]
    fn append_merges_with_last() {
        let mut t = ts("rotate(10) translate(1 2)");
        t.append(Descriptor::Translate { tx: 3.0, ty: 4.0 });
        assert_eq!(t.to_string(), "rotate(10) translate(4 6)");

        t.append(Descriptor::Scale { sx: 2.0, sy: 2.0 });
        assert_eq!(t.len(), 3);
        assert_eq!(t.matrices().len(), 3);
    }

    #[test]
    fn append_left_merges_with_first() {
        let mut t = ts("scale(2) translate(1 2)");
        t.append_left(Descriptor::Scale { sx: 3.0, sy: 3.0 });
        assert_eq!(t.to_string(), "scale(6) translate(1 2)");

        t.append_left(Descriptor::SkewY { angle: 10.0 });
        assert_eq!(t.descriptors()[0], Descriptor::SkewY { angle: 10.0 });
    }

    #[test]
    fn merged_keeps_matrix() {
        let t = ts("translate(1 2) translate(3 4) rotate(30 5 5) rotate(15 5 5) \
                    scale(2) scale(1 3) skewX(10) skewX(20) matrix(1 2 3 4 5 6) matrix(6 5 4 3 2 1)");
        let m = t.merged();
        assert_eq!(m.len(), 5);
        assert!(t.matrix().fuzzy_eq(&m.matrix(), 1e-6));
    }

    #[test]
    fn inverse_1() {
        let m = ts("translate(10 20) scale(2) rotate(30)").matrix();
        let inv = m.inverse().unwrap();
        assert!((m * inv).fuzzy_eq(&Matrix::default(), EPS));
        assert_eq!(Matrix::new(0.0, 0.0, 0.0, 0.0, 1.0, 1.0).inverse(), None);
    }

    #[test]
    fn fix_precision_1() {
        let t = ts("translate(1.23456 2.34567)");
        assert_eq!(t.fix_precision(1).to_string(), "translate(1.2 2.3)");
        assert_eq!(t.to_string(), "translate(1.23456 2.34567)");
    }
}
