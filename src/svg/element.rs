// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;

use super::attrs::*;
use super::claims::AttrClaims;
use super::AttrValue;
use crate::xml::XmlElement;
use crate::{ToStringWithOptions, ValueError, Warning, WriteOptions};

/// A known element: a typed attribute record, leftover attributes and children.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Element<A> {
    #[allow(missing_docs)]
    pub attrs: A,
    /// Attributes not recognized for this element or with invalid values.
    pub unknown: IndexMap<String, String>,
    #[allow(missing_docs)]
    pub children: Vec<ParsedElement>,
}

impl<A: Default> Element<A> {
    /// Constructs an element without attributes and children.
    pub fn new() -> Self {
        Element::default()
    }
}

/// An element with an unsupported tag name.
///
/// Attributes are kept as raw strings.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct UnknownElement {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<ParsedElement>,
}

macro_rules! parsed_node {
    ($($variant:ident($attrs:ty) => $tag:literal,)+) => (
        /// Kinds of parsed nodes.
        #[derive(Clone, PartialEq, Debug)]
        #[allow(missing_docs)]
        pub enum ParsedNode {
            $($variant(Element<$attrs>),)+
            /// A text node, addressed as `text()`.
            TextContent(String),
            /// A comment, addressed as `comment()`.
            Comment(String),
            /// A CDATA section, addressed as `cdata()`.
            Cdata(String),
            Unknown(UnknownElement),
        }

        impl ParsedNode {
            /// Returns the tag name used in addresses.
            pub fn tag(&self) -> &str {
                match *self {
                    $(ParsedNode::$variant(_) => $tag,)+
                    ParsedNode::TextContent(_) => "text()",
                    ParsedNode::Comment(_) => "comment()",
                    ParsedNode::Cdata(_) => "cdata()",
                    ParsedNode::Unknown(ref e) => &e.tag,
                }
            }

            /// Returns child nodes. Leaf nodes have none.
            pub fn children(&self) -> &[ParsedElement] {
                match *self {
                    $(ParsedNode::$variant(ref e) => &e.children,)+
                    ParsedNode::Unknown(ref e) => &e.children,
                    _ => &[],
                }
            }

            /// Returns child nodes. `None` for leaf nodes.
            pub fn children_mut(&mut self) -> Option<&mut Vec<ParsedElement>> {
                match *self {
                    $(ParsedNode::$variant(ref mut e) => Some(&mut e.children),)+
                    ParsedNode::Unknown(ref mut e) => Some(&mut e.children),
                    _ => None,
                }
            }

            /// Returns the attribute record of a known element.
            pub fn attrs(&self) -> Option<&dyn ElementAttrs> {
                match *self {
                    $(ParsedNode::$variant(ref e) => Some(&e.attrs as &dyn ElementAttrs),)+
                    _ => None,
                }
            }

            #[allow(missing_docs)]
            pub fn attrs_mut(&mut self) -> Option<&mut dyn ElementAttrs> {
                match *self {
                    $(ParsedNode::$variant(ref mut e) => Some(&mut e.attrs as &mut dyn ElementAttrs),)+
                    _ => None,
                }
            }

            /// Returns raw attributes: leftovers of a known element
            /// or all attributes of an unknown one.
            pub fn unknown_attrs(&self) -> Option<&IndexMap<String, String>> {
                match *self {
                    $(ParsedNode::$variant(ref e) => Some(&e.unknown),)+
                    ParsedNode::Unknown(ref e) => Some(&e.attrs),
                    _ => None,
                }
            }

            #[allow(missing_docs)]
            pub fn unknown_attrs_mut(&mut self) -> Option<&mut IndexMap<String, String>> {
                match *self {
                    $(ParsedNode::$variant(ref mut e) => Some(&mut e.unknown),)+
                    ParsedNode::Unknown(ref mut e) => Some(&mut e.attrs),
                    _ => None,
                }
            }

            /// Builds a known element from an XML one, along with the raw
            /// values that were consumed but failed to decode.
            ///
            /// Children are returned back when the tag is not supported.
            pub(crate) fn from_xml(
                elem: &XmlElement,
                children: Vec<ParsedElement>,
                warns: &mut Vec<Warning>,
            ) -> Result<(ParsedNode, IndexMap<String, String>), Vec<ParsedElement>> {
                match elem.name.as_str() {
                    $(
                        $tag => {
                            let mut claims = AttrClaims::new(elem, warns);
                            let attrs = <$attrs as AttrRecord>::claim(&mut claims);
                            let rejected = claims.take_rejected();
                            let node = ParsedNode::$variant(Element {
                                attrs,
                                unknown: claims.finish(),
                                children,
                            });
                            Ok((node, rejected))
                        }
                    )+
                    _ => Err(children),
                }
            }
        }
    )
}

parsed_node!(
    Svg(SvgAttrs) => "svg",
    Circle(CircleAttrs) => "circle",
    Rect(RectAttrs) => "rect",
    Ellipse(EllipseAttrs) => "ellipse",
    Polyline(PolyAttrs) => "polyline",
    Polygon(PolyAttrs) => "polygon",
    Path(PathAttrs) => "path",
    Text(TextAttrs) => "text",
    G(GroupAttrs) => "g",
    Defs(GroupAttrs) => "defs",
    LinearGradient(LinearGradientAttrs) => "linearGradient",
    RadialGradient(RadialGradientAttrs) => "radialGradient",
    Stop(StopAttrs) => "stop",
    Image(ImageAttrs) => "image",
    Use(UseAttrs) => "use",
    Style(StyleElementAttrs) => "style",
    Script(ScriptAttrs) => "script",
    Animate(AnimationAttrs) => "animate",
    AnimateColor(AnimationAttrs) => "animateColor",
    AnimateMotion(AnimateMotionAttrs) => "animateMotion",
    AnimateTransform(AnimateTransformAttrs) => "animateTransform",
    Discard(DiscardAttrs) => "discard",
    Mpath(MpathAttrs) => "mpath",
    Set(AnimationAttrs) => "set",
);

impl ParsedNode {
    /// Checks that the element can contain graphics elements.
    pub fn is_container(&self) -> bool {
        matches!(*self, ParsedNode::Svg(_) | ParsedNode::G(_) | ParsedNode::Defs(_))
    }

    /// Checks that the element structures a document.
    pub fn is_structural(&self) -> bool {
        matches!(
            *self,
            ParsedNode::Svg(_) | ParsedNode::G(_) | ParsedNode::Defs(_) | ParsedNode::Use(_)
        )
    }

    /// Checks that the element is a paint server.
    pub fn is_gradient(&self) -> bool {
        matches!(*self, ParsedNode::LinearGradient(_) | ParsedNode::RadialGradient(_))
    }

    /// Checks that the element can be rendered on its own.
    pub fn can_be_display_root(&self) -> bool {
        matches!(*self, ParsedNode::Svg(_) | ParsedNode::G(_))
    }

    /// Checks that the node is a text, comment or CDATA.
    pub fn is_leaf(&self) -> bool {
        matches!(
            *self,
            ParsedNode::TextContent(_) | ParsedNode::Comment(_) | ParsedNode::Cdata(_)
        )
    }
}

/// A node of the semantic SVG tree.
#[derive(Clone, PartialEq, Debug)]
pub struct ParsedElement {
    /// The node address. Valid only after `dom::update_xpaths`.
    pub xpath: String,
    /// The parent address. `None` for the root.
    pub parent: Option<String>,
    #[allow(missing_docs)]
    pub node: ParsedNode,
    // Attribute strings the element was parsed from.
    pub(crate) source_attrs: IndexMap<String, String>,
    // Invalid values of consumed attributes. Written back as is until
    // the attribute is set or removed.
    pub(crate) rejected: IndexMap<String, String>,
}

impl ParsedElement {
    /// Constructs a new detached node.
    ///
    /// The address is empty until the next `dom::update_xpaths`.
    pub fn new(node: ParsedNode) -> Self {
        ParsedElement {
            xpath: String::new(),
            parent: None,
            node,
            source_attrs: IndexMap::new(),
            rejected: IndexMap::new(),
        }
    }

    /// Constructs a text node.
    pub fn new_text<S: Into<String>>(text: S) -> Self {
        Self::new(ParsedNode::TextContent(text.into()))
    }

    /// Returns the tag name used in addresses.
    pub fn tag(&self) -> &str {
        self.node.tag()
    }

    #[allow(missing_docs)]
    pub fn children(&self) -> &[ParsedElement] {
        self.node.children()
    }

    #[allow(missing_docs)]
    pub fn children_mut(&mut self) -> Option<&mut Vec<ParsedElement>> {
        self.node.children_mut()
    }

    #[allow(missing_docs)]
    pub fn attrs(&self) -> Option<&dyn ElementAttrs> {
        self.node.attrs()
    }

    #[allow(missing_docs)]
    pub fn attrs_mut(&mut self) -> Option<&mut dyn ElementAttrs> {
        self.node.attrs_mut()
    }

    /// Returns the element `id`.
    pub fn id(&self) -> Option<&str> {
        match self.node {
            ParsedNode::Unknown(ref e) => e.attrs.get("id").map(|s| s.as_str()),
            _ => self.attrs().and_then(|a| a.core().id.as_deref()),
        }
    }

    /// Returns a typed attribute value.
    pub fn attr_value(&self, name: &str) -> Option<AttrValue> {
        let mut values = Vec::new();
        self.attrs()?.collect_attrs(&mut values);
        values.into_iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Returns an attribute as a string.
    ///
    /// Typed values are written with the default options. Invalid values
    /// are returned as written in the source.
    pub fn attr(&self, name: &str) -> Option<String> {
        if let Some(v) = self.attr_value(name) {
            return Some(v.to_string_with_opt(&WriteOptions::default()));
        }

        self.node
            .unknown_attrs()
            .and_then(|attrs| attrs.get(name))
            .or_else(|| self.rejected.get(name))
            .cloned()
    }

    /// Sets an attribute from a string.
    ///
    /// Attributes of the element record are parsed and an invalid value
    /// is an error. All other attributes are stored as raw strings.
    pub fn set_attr(&mut self, name: &str, value: &str) -> Result<(), ValueError> {
        if let Some(attrs) = self.node.attrs_mut() {
            if let Some(res) = attrs.assign_attr(name, value) {
                res?;
                self.rejected.shift_remove(name);
                if let Some(unknown) = self.node.unknown_attrs_mut() {
                    unknown.shift_remove(name);
                }
                return Ok(());
            }
        }

        if let Some(unknown) = self.node.unknown_attrs_mut() {
            unknown.insert(name.to_string(), value.to_string());
        }

        Ok(())
    }

    /// Removes an attribute.
    pub fn remove_attr(&mut self, name: &str) {
        self.rejected.shift_remove(name);
        if let Some(attrs) = self.node.attrs_mut() {
            attrs.clear_attr(name);
        }

        if let Some(unknown) = self.node.unknown_attrs_mut() {
            unknown.shift_remove(name);
        }
    }

    /// Returns the concatenated content of child text and CDATA nodes.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in self.children() {
            match child.node {
                ParsedNode::TextContent(ref s) | ParsedNode::Cdata(ref s) => text.push_str(s),
                _ => {}
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Length;

    #[test]
    fn tags() {
        let e = ParsedElement::new(ParsedNode::LinearGradient(Element::new()));
        assert_eq!(e.tag(), "linearGradient");
        assert!(e.node.is_gradient());
        assert_eq!(ParsedElement::new_text("x").tag(), "text()");
    }

    #[test]
    fn set_attr_1() {
        let mut e = ParsedElement::new(ParsedNode::Circle(Element::new()));
        e.set_attr("r", "40").unwrap();
        e.set_attr("data-x", "1").unwrap();
        assert!(e.set_attr("cx", "wide").is_err());

        match e.node {
            ParsedNode::Circle(ref c) => {
                assert_eq!(c.attrs.r, Some(Length::new(40.0, None, "r")));
                assert_eq!(c.unknown["data-x"], "1");
            }
            _ => unreachable!(),
        }

        assert_eq!(e.attr("r").as_deref(), Some("40"));
        assert_eq!(e.attr("data-x").as_deref(), Some("1"));

        e.remove_attr("r");
        assert_eq!(e.attr("r"), None);
    }

    #[test]
    fn set_attr_replaces_invalid_leftover() {
        let mut circle: Element<CircleAttrs> = Element::new();
        circle.unknown.insert("r".to_string(), "big".to_string());
        let mut e = ParsedElement::new(ParsedNode::Circle(circle));
        e.set_attr("r", "5").unwrap();
        assert!(e.node.unknown_attrs().unwrap().is_empty());
    }

    #[test]
    fn unknown_id() {
        let mut attrs = IndexMap::new();
        attrs.insert("id".to_string(), "u".to_string());
        let e = ParsedElement::new(ParsedNode::Unknown(UnknownElement {
            tag: "foreignObject".to_string(),
            attrs,
            children: Vec::new(),
        }));
        assert_eq!(e.id(), Some("u"));
        assert_eq!(e.tag(), "foreignObject");
    }
}
