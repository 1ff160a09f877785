// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;

use super::{ParsedElement, ParsedNode, UnknownElement};
use crate::dom;
use crate::xml::{XmlElement, XmlNode};
use crate::Warning;

/// A semantic parsing result.
#[derive(Clone, Debug)]
pub struct Parsed {
    /// The root node, with up to date addresses.
    pub result: ParsedElement,
    /// Recoverable problems, in the document order.
    pub warns: Vec<Warning>,
}

/// Converts a positioned XML tree into a semantic SVG tree.
///
/// Never fails: unsupported elements and attributes are kept as is
/// and reported as warnings.
pub fn parse(root: &XmlElement) -> Parsed {
    let mut warns = Vec::new();
    let mut result = parse_element(root, &mut warns);
    dom::update_xpaths(&mut result);

    // Children are parsed before their parents.
    warns.sort_by_key(|w| w.interval.start);

    debug!(
        "Parsed {} nodes with {} warnings.",
        result.descendants().count(),
        warns.len()
    );

    Parsed { result, warns }
}

fn parse_node(node: &XmlNode, warns: &mut Vec<Warning>) -> ParsedElement {
    match *node {
        XmlNode::Element(ref e) => parse_element(e, warns),
        XmlNode::Text(ref t) => ParsedElement::new(ParsedNode::TextContent(t.text.clone())),
        XmlNode::Comment(ref t) => ParsedElement::new(ParsedNode::Comment(t.text.clone())),
        XmlNode::Cdata(ref t) => ParsedElement::new(ParsedNode::Cdata(t.text.clone())),
    }
}

fn parse_element(elem: &XmlElement, warns: &mut Vec<Warning>) -> ParsedElement {
    let children: Vec<ParsedElement> = elem.children.iter().map(|n| parse_node(n, warns)).collect();

    let (node, rejected) = match ParsedNode::from_xml(elem, children, warns) {
        Ok(v) => v,
        Err(children) => {
            let msg = format!("unsupported element '{}'", elem.name);
            warn!("{} at {}.", msg, elem.positions.start_tag);
            warns.push(Warning::new(elem.positions.start_tag, msg));

            let node = ParsedNode::Unknown(UnknownElement {
                tag: elem.name.clone(),
                attrs: elem.attrs.clone(),
                children,
            });
            (node, IndexMap::new())
        }
    };

    let mut parsed = ParsedElement::new(node);
    parsed.source_attrs = elem.attrs.clone();
    parsed.rejected = rejected;
    parsed
}
