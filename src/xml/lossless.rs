// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;

use super::text::{escape_attribute, escape_text};
use crate::{WriteBuffer, WriteOptions};

/// A position-free element snapshot.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LosslessElement {
    #[allow(missing_docs)]
    pub tag: String,
    /// Raw attribute values.
    pub attrs: IndexMap<String, String>,
    #[allow(missing_docs)]
    pub children: Vec<LosslessNode>,
}

impl LosslessElement {
    /// Constructs a new element without attributes and children.
    pub fn new<S: Into<String>>(tag: S) -> Self {
        LosslessElement {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }
}

/// A position-free node snapshot.
///
/// Both sides of a diff are compared in this shape.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[allow(missing_docs)]
pub enum LosslessNode {
    Element(LosslessElement),
    Text(String),
    Comment(String),
    Cdata(String),
}

impl LosslessNode {
    /// Returns the node as an element, if it is one.
    pub fn as_element(&self) -> Option<&LosslessElement> {
        match *self {
            LosslessNode::Element(ref e) => Some(e),
            _ => None,
        }
    }

    /// Writes the node as a compact XML.
    pub fn to_xml_string(&self) -> String {
        self.to_string()
    }
}

impl WriteBuffer for LosslessElement {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        buf.push(b'<');
        buf.extend_from_slice(self.tag.as_bytes());
        for (name, value) in &self.attrs {
            buf.push(b' ');
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b"=\"");
            buf.extend_from_slice(escape_attribute(value, '"').as_bytes());
            buf.push(b'"');
        }

        if self.children.is_empty() {
            buf.extend_from_slice(b"/>");
            return;
        }

        buf.push(b'>');
        for child in &self.children {
            child.write_buf_opt(opt, buf);
        }
        buf.extend_from_slice(b"</");
        buf.extend_from_slice(self.tag.as_bytes());
        buf.push(b'>');
    }
}

impl WriteBuffer for LosslessNode {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        match *self {
            LosslessNode::Element(ref e) => e.write_buf_opt(opt, buf),
            LosslessNode::Text(ref text) => buf.extend_from_slice(escape_text(text).as_bytes()),
            LosslessNode::Comment(ref text) => {
                buf.extend_from_slice(b"<!--");
                buf.extend_from_slice(text.as_bytes());
                buf.extend_from_slice(b"-->");
            }
            LosslessNode::Cdata(ref text) => {
                buf.extend_from_slice(b"<![CDATA[");
                buf.extend_from_slice(text.as_bytes());
                buf.extend_from_slice(b"]]>");
            }
        }
    }
}

impl_display!(LosslessElement);
impl_display!(LosslessNode);
