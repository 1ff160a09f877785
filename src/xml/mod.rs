// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Positioned XML tree.
//!
//! Every node and every attribute of the tree remembers its exact byte
//! interval inside the source text. The tree is never edited after parsing.

use indexmap::IndexMap;
use thiserror::Error;

pub use self::lossless::{LosslessElement, LosslessNode};
pub use self::parser::parse;
pub(crate) use self::text::{escape_attribute, escape_text};

mod lossless;
mod parser;
mod text;

use crate::interval::TextPos;
use crate::Interval;

/// XML parsing errors.
///
/// All of them are fatal: no partial tree is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// A tokenizer error, like an unterminated tag or attribute.
    #[error(transparent)]
    Tokenizer(#[from] xmlparser::Error),

    /// A close tag doesn't match the currently open element.
    #[error("expected '</{expected}>' not '</{actual}>' at {pos}")]
    UnexpectedCloseTag {
        #[allow(missing_docs)]
        expected: String,
        #[allow(missing_docs)]
        actual: String,
        #[allow(missing_docs)]
        pos: TextPos,
    },

    /// A close tag without an open element.
    #[error("unexpected close tag '</{name}>' at {pos}")]
    UnmatchedCloseTag {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        pos: TextPos,
    },

    /// The input ended inside an element.
    #[error("element '{name}' opened at {pos} is not closed")]
    UnclosedElement {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        pos: TextPos,
    },

    /// An element has the same attribute twice.
    #[error("duplicated attribute '{name}' at {pos}")]
    DuplicatedAttribute {
        #[allow(missing_docs)]
        name: String,
        #[allow(missing_docs)]
        pos: TextPos,
    },

    /// A second element on the top level.
    #[error("the document has more than one root element, the second one is at {pos}")]
    MultipleRoots {
        #[allow(missing_docs)]
        pos: TextPos,
    },

    /// A non-whitespace text before or after the root element.
    #[error("unexpected text outside the root element at {pos}")]
    TextOutsideRoot {
        #[allow(missing_docs)]
        pos: TextPos,
    },
}

/// Source intervals of a single attribute.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AttrPositions {
    /// The qualified name, like `xlink:href`.
    pub name: Interval,
    /// The raw value, quotes excluded.
    pub value: Interval,
    /// The quote character used in the source.
    pub quote: char,
}

/// Source intervals of an element.
#[derive(Clone, PartialEq, Debug)]
pub struct ElementPositions {
    /// The whole element, from `<` of the open tag to `>` of the close tag.
    pub element: Interval,
    /// `<name attrs>` or `<name attrs/>`.
    pub open_element: Interval,
    /// `</name>`. `None` for self-closing elements.
    pub close_element: Option<Interval>,
    /// The name inside the open tag.
    pub start_tag: Interval,
    /// The name inside the close tag. `None` for self-closing elements.
    pub end_tag: Option<Interval>,
    /// Attribute intervals, in the source order.
    pub attrs: IndexMap<String, AttrPositions>,
}

/// An XML element with source positions.
#[derive(Clone, PartialEq, Debug)]
pub struct XmlElement {
    /// The qualified tag name.
    pub name: String,
    /// Unescaped attribute values, in the source order.
    pub attrs: IndexMap<String, String>,
    #[allow(missing_docs)]
    pub children: Vec<XmlNode>,
    #[allow(missing_docs)]
    pub positions: ElementPositions,
}

/// A text-like node: text, comment or CDATA.
#[derive(Clone, PartialEq, Debug)]
pub struct XmlText {
    /// The node content. Unescaped for text nodes, raw otherwise.
    pub text: String,
    /// The node interval, delimiters included.
    pub interval: Interval,
}

/// An XML node with source positions.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum XmlNode {
    Element(XmlElement),
    Text(XmlText),
    Comment(XmlText),
    Cdata(XmlText),
}

/// Which part of a node an interval should cover.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IntervalKind {
    /// The whole node.
    Outer,
    /// The content only, without tags or delimiters.
    Inner,
}

impl XmlElement {
    /// Checks that the element was written as `<name/>`.
    pub fn is_self_closing(&self) -> bool {
        self.positions.close_element.is_none()
    }

    /// Returns the element interval.
    ///
    /// The inner interval of a self-closing element is empty and placed
    /// at the end of its open tag.
    pub fn interval(&self, kind: IntervalKind) -> Interval {
        let pos = &self.positions;
        match kind {
            IntervalKind::Outer => pos.element,
            IntervalKind::Inner => match pos.close_element {
                Some(close) => Interval::new(pos.open_element.end, close.start),
                None => Interval::empty(pos.open_element.end),
            },
        }
    }

    /// Returns child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|n| match *n {
            XmlNode::Element(ref e) => Some(e),
            _ => None,
        })
    }

    /// Converts the element into a position-free snapshot.
    pub fn to_lossless(&self) -> LosslessElement {
        LosslessElement {
            tag: self.name.clone(),
            attrs: self.attrs.clone(),
            children: self.children.iter().map(XmlNode::to_lossless).collect(),
        }
    }
}

impl XmlNode {
    /// Returns the node interval.
    pub fn interval(&self, kind: IntervalKind) -> Interval {
        match *self {
            XmlNode::Element(ref e) => e.interval(kind),
            XmlNode::Text(ref t) => t.interval,
            // `<!--` and `-->`
            XmlNode::Comment(ref t) => match kind {
                IntervalKind::Outer => t.interval,
                IntervalKind::Inner => Interval::new(t.interval.start + 4, t.interval.end - 3),
            },
            // `<![CDATA[` and `]]>`
            XmlNode::Cdata(ref t) => match kind {
                IntervalKind::Outer => t.interval,
                IntervalKind::Inner => Interval::new(t.interval.start + 9, t.interval.end - 3),
            },
        }
    }

    /// Converts the node into a position-free snapshot.
    pub fn to_lossless(&self) -> LosslessNode {
        match *self {
            XmlNode::Element(ref e) => LosslessNode::Element(e.to_lossless()),
            XmlNode::Text(ref t) => LosslessNode::Text(t.text.clone()),
            XmlNode::Comment(ref t) => LosslessNode::Comment(t.text.clone()),
            XmlNode::Cdata(ref t) => LosslessNode::Cdata(t.text.clone()),
        }
    }
}

/// Returns the interval of a node.
///
/// Same as [`XmlNode::interval`].
pub fn get_node_interval(node: &XmlNode, kind: IntervalKind) -> Interval {
    node.interval(kind)
}

/// Removes whitespace-only text nodes and trims the remaining text nodes.
///
/// Intervals are left untouched, so they still cover the raw source text.
pub fn trim(element: &mut XmlElement) {
    element.children.retain(|n| match *n {
        XmlNode::Text(ref t) => !t.text.trim().is_empty(),
        _ => true,
    });

    for child in &mut element.children {
        match *child {
            XmlNode::Element(ref mut e) => trim(e),
            XmlNode::Text(ref mut t) => {
                let trimmed = t.text.trim();
                if trimmed.len() != t.text.len() {
                    t.text = trimmed.to_string();
                }
            }
            _ => {}
        }
    }
}

/// Removes all comment nodes.
pub fn strip_comments(element: &mut XmlElement) {
    element.children.retain(|n| !matches!(*n, XmlNode::Comment(_)));
    for child in &mut element.children {
        if let XmlNode::Element(ref mut e) = *child {
            strip_comments(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_root(text: &str) -> XmlElement {
        parse(text).unwrap().unwrap()
    }

    #[test]
    fn inner_interval_1() {
        let root = parse_root("<hello>world</hello>");
        assert_eq!(root.interval(IntervalKind::Inner), Interval::new(7, 12));
        assert_eq!(root.interval(IntervalKind::Outer), Interval::new(0, 20));
    }

    #[test]
    fn inner_interval_2() {
        let root = parse_root("<a/>");
        assert_eq!(root.interval(IntervalKind::Inner), Interval::empty(4));
    }

    #[test]
    fn inner_interval_3() {
        let text = "<a><!--note--><![CDATA[x<y]]></a>";
        let root = parse_root(text);
        let comment = &root.children[0];
        assert_eq!(&text[comment.interval(IntervalKind::Inner).range()], "note");
        assert_eq!(&text[comment.interval(IntervalKind::Outer).range()], "<!--note-->");
        let cdata = &root.children[1];
        assert_eq!(&text[get_node_interval(cdata, IntervalKind::Inner).range()], "x<y");
    }

    #[test]
    fn trim_1() {
        let mut root = parse_root("<a>\n  <b> text </b>\n</a>");
        assert_eq!(root.children.len(), 3);
        trim(&mut root);
        assert_eq!(root.children.len(), 1);
        match root.children[0] {
            XmlNode::Element(ref b) => match b.children[0] {
                XmlNode::Text(ref t) => {
                    assert_eq!(t.text, "text");
                    assert_eq!(t.interval, Interval::new(9, 15));
                }
                _ => panic!("expected text"),
            },
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn strip_comments_1() {
        let mut root = parse_root("<a><!--1--><b><!--2--></b></a>");
        strip_comments(&mut root);
        assert_eq!(root.to_lossless().to_string(), "<a><b/></a>");
    }
}
