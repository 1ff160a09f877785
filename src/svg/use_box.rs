// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::cell::OnceCell;

use super::attrs::UseAttrs;
use super::{ParsedElement, ParsedNode};
use crate::dom;
use crate::types::Length;

// Guards against `use` elements referencing each other.
const MAX_USE_DEPTH: usize = 16;

/// A resolved `use` element box in user units.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct VirtualBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A memoized `VirtualBox`.
///
/// The cache doesn't take part in comparison.
#[derive(Clone, Default, Debug)]
pub struct VirtualCache(OnceCell<Option<VirtualBox>>);

impl VirtualCache {
    /// Drops the memoized value.
    pub fn invalidate(&mut self) {
        self.0 = OnceCell::new();
    }

    /// Checks that the value was already computed.
    pub fn is_resolved(&self) -> bool {
        self.0.get().is_some()
    }
}

impl PartialEq for VirtualCache {
    fn eq(&self, _: &VirtualCache) -> bool {
        true
    }
}

/// Returns the root viewport size used to resolve percentages.
///
/// Taken from the root `viewBox`, then from its `width` and `height`.
pub fn viewport(root: &ParsedElement) -> (f64, f64) {
    if let ParsedNode::Svg(ref svg) = root.node {
        if let Some(vb) = svg.attrs.view_box {
            return vb.size;
        }

        let size = |len: &Option<Length>| {
            len.as_ref().map(|l| l.to_user_units((0.0, 0.0))).unwrap_or(0.0)
        };
        return (size(&svg.attrs.width), size(&svg.attrs.height));
    }

    (0.0, 0.0)
}

fn user_units(len: &Option<Length>, viewport: (f64, f64)) -> Option<f64> {
    len.as_ref().map(|l| l.to_user_units(viewport))
}

fn href(attrs: &UseAttrs) -> Option<&str> {
    attrs
        .href
        .as_deref()
        .or(attrs.xlink_href.as_deref())
        .and_then(|s| s.strip_prefix('#'))
}

fn resolve(root: &ParsedElement, attrs: &UseAttrs, depth: usize) -> Option<VirtualBox> {
    if depth > MAX_USE_DEPTH {
        warn!("'use' elements are nested too deep.");
        return None;
    }

    let target = dom::find_elem_by_id(root, href(attrs)?)?;
    let vp = viewport(root);
    let len = |l: &Option<Length>| user_units(l, vp);

    let (x, y, width, height) = match target.node {
        ParsedNode::Rect(ref e) => (
            len(&e.attrs.x).unwrap_or(0.0),
            len(&e.attrs.y).unwrap_or(0.0),
            len(&e.attrs.width)?,
            len(&e.attrs.height)?,
        ),
        ParsedNode::Image(ref e) => (
            len(&e.attrs.x).unwrap_or(0.0),
            len(&e.attrs.y).unwrap_or(0.0),
            len(&e.attrs.width)?,
            len(&e.attrs.height)?,
        ),
        ParsedNode::Svg(ref e) => {
            // The referencing element overrides the size of an `svg`.
            let vb_size = e.attrs.view_box.map(|vb| vb.size);
            (
                len(&e.attrs.x).unwrap_or(0.0),
                len(&e.attrs.y).unwrap_or(0.0),
                len(&attrs.width)
                    .or_else(|| len(&e.attrs.width))
                    .or(vb_size.map(|s| s.0))?,
                len(&attrs.height)
                    .or_else(|| len(&e.attrs.height))
                    .or(vb_size.map(|s| s.1))?,
            )
        }
        ParsedNode::Circle(ref e) => {
            let r = len(&e.attrs.r)?;
            let cx = len(&e.attrs.cx).unwrap_or(0.0);
            let cy = len(&e.attrs.cy).unwrap_or(0.0);
            (cx - r, cy - r, r * 2.0, r * 2.0)
        }
        ParsedNode::Ellipse(ref e) => {
            let rx = len(&e.attrs.rx)?;
            let ry = len(&e.attrs.ry)?;
            let cx = len(&e.attrs.cx).unwrap_or(0.0);
            let cy = len(&e.attrs.cy).unwrap_or(0.0);
            (cx - rx, cy - ry, rx * 2.0, ry * 2.0)
        }
        ParsedNode::Use(ref e) => {
            let b = resolve(root, &e.attrs, depth + 1)?;
            (b.x, b.y, b.width, b.height)
        }
        _ => return None,
    };

    Some(VirtualBox {
        x: x + len(&attrs.x).unwrap_or(0.0),
        y: y + len(&attrs.y).unwrap_or(0.0),
        width,
        height,
    })
}

impl ParsedElement {
    /// Returns the box of a `use` element, following its reference.
    ///
    /// The result is memoized. `None` for other elements, for broken
    /// references and for targets without a size.
    pub fn virtual_box(&self, root: &ParsedElement) -> Option<VirtualBox> {
        match self.node {
            ParsedNode::Use(ref e) => *e.attrs.virtual_box.0.get_or_init(|| resolve(root, &e.attrs, 0)),
            _ => None,
        }
    }
}

/// Drops memoized boxes of all `use` elements.
///
/// Must be called after geometry edits of referenced elements.
pub fn invalidate_virtual_boxes(root: &mut ParsedElement) {
    let _: Option<()> = dom::traverse_mut(root, |node| {
        if let ParsedNode::Use(ref mut e) = node.node {
            e.attrs.virtual_box.invalidate();
        }
        None
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg;
    use crate::xml;

    fn parse(text: &str) -> ParsedElement {
        svg::parse(&xml::parse(text).unwrap().unwrap()).result
    }

    fn use_box(root: &ParsedElement, address: &str) -> Option<VirtualBox> {
        dom::find(root, address).unwrap().virtual_box(root)
    }

    fn is_cached(root: &ParsedElement, address: &str) -> bool {
        match dom::find(root, address).unwrap().node {
            ParsedNode::Use(ref e) => e.attrs.virtual_box.is_resolved(),
            _ => false,
        }
    }

    #[test]
    fn rect_target() {
        let root = parse(
            "<svg viewBox=\"0 0 200 100\"><rect id=\"r\" x=\"10\" y=\"5\" width=\"50%\" height=\"20\"/>\
             <use href=\"#r\" x=\"1\" y=\"2\"/></svg>",
        );
        assert_eq!(
            use_box(&root, "/svg/use"),
            Some(VirtualBox { x: 11.0, y: 7.0, width: 100.0, height: 20.0 })
        );
    }

    #[test]
    fn circle_and_chain() {
        let root = parse(
            "<svg><circle id=\"c\" cx=\"10\" cy=\"10\" r=\"5\"/>\
             <use id=\"u1\" xlink:href=\"#c\"/><use href=\"#u1\" x=\"100\"/></svg>",
        );
        assert_eq!(
            use_box(&root, "/svg/use[2]"),
            Some(VirtualBox { x: 105.0, y: 5.0, width: 10.0, height: 10.0 })
        );
    }

    #[test]
    fn broken_and_cyclic() {
        let root = parse(
            "<svg><use href=\"#none\"/><use id=\"a\" href=\"#b\"/><use id=\"b\" href=\"#a\"/></svg>",
        );
        assert_eq!(use_box(&root, "/svg/use[1]"), None);
        assert_eq!(use_box(&root, "/svg/use[2]"), None);
    }

    #[test]
    fn invalidate() {
        let mut root = parse("<svg><rect id=\"r\" width=\"1\" height=\"1\"/><use href=\"#r\"/></svg>");
        assert!(!is_cached(&root, "/svg/use"));
        assert!(use_box(&root, "/svg/use").is_some());
        assert!(is_cached(&root, "/svg/use"));

        dom::find_mut(&mut root, "/svg/rect").unwrap().set_attr("width", "4").unwrap();
        // stale until invalidated
        assert_eq!(use_box(&root, "/svg/use").unwrap().width, 1.0);
        invalidate_virtual_boxes(&mut root);
        assert!(!is_cached(&root, "/svg/use"));
        assert_eq!(use_box(&root, "/svg/use").unwrap().width, 4.0);
    }
}
