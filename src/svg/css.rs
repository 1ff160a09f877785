// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Presentation attributes resolution.
//!
//! Only the embedded `<style>` elements are used as a stylesheet.
//! The matching itself is done by `simplecss`.

use simplecss::{AttributeOperator, Declaration, PseudoClass, StyleSheet};

use super::attrs::{AttrRecord, PresentationAttrs};
use super::{ParsedElement, ParsedNode};
use crate::dom;

/// A stylesheet collected from `<style>` elements.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Stylesheet {
    text: String,
}

impl Stylesheet {
    /// Collects the text of all CSS `<style>` elements in document order.
    pub fn from_tree(root: &ParsedElement) -> Self {
        let mut text = String::new();
        for node in root.descendants() {
            if let ParsedNode::Style(ref e) = node.node {
                let is_css = match e.attrs.content_type {
                    Some(ref t) => t.is_empty() || t == "text/css",
                    None => true,
                };

                if is_css {
                    text.push_str(&node.text_content());
                    text.push('\n');
                }
            }
        }

        Stylesheet { text }
    }

    /// Checks that the stylesheet has no text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Computes the effective presentation attributes of a node.
    ///
    /// Values are inherited from ancestors, except `transform` and `opacity`.
    /// Then the node's own values are applied in this order: presentation
    /// attributes, stylesheet rules by ascending specificity, the inline
    /// `style` attribute and `!important` rules.
    ///
    /// Returns `None` when the address doesn't exist.
    pub fn resolve_presentation(&self, root: &ParsedElement, xpath: &str) -> Option<PresentationAttrs> {
        let path = dom::find_path(root, xpath)?;
        let sheet = StyleSheet::parse(&self.text);

        let mut node = CssNode { chain: vec![(0, root)] };
        let mut effective = cascade(&sheet, &node);
        for idx in path {
            let parent = node.elem()?;
            let child = parent.children().get(idx)?;
            node.chain.push((idx, child));

            let mut values = effective.inheritable();
            values.overlay(&cascade(&sheet, &node));
            effective = values;
        }

        Some(effective)
    }
}

/// Computes the effective presentation attributes of a node.
///
/// A shorthand for [`Stylesheet::resolve_presentation`] with a stylesheet
/// collected from the same tree.
pub fn resolve_presentation(root: &ParsedElement, xpath: &str) -> Option<PresentationAttrs> {
    Stylesheet::from_tree(root).resolve_presentation(root, xpath)
}

fn apply_declaration(values: &mut PresentationAttrs, decl: &Declaration) {
    match values.assign(decl.name, decl.value) {
        Some(Err(e)) => warn!("Invalid CSS value of '{}': {}.", decl.name, e),
        None => debug!("CSS property '{}' is not supported.", decl.name),
        Some(Ok(())) => {}
    }
}

// Own values of a node, without inheritance.
fn cascade(sheet: &StyleSheet, node: &CssNode) -> PresentationAttrs {
    let elem = match node.elem() {
        Some(elem) => elem,
        None => return PresentationAttrs::default(),
    };

    let attrs = elem.attrs();
    let mut values = attrs
        .and_then(|a| a.presentation())
        .cloned()
        .unwrap_or_default();

    let mut decls = Vec::new();
    if !elem.node.is_leaf() {
        for (order, rule) in sheet.rules.iter().enumerate() {
            if rule.selector.matches(node) {
                let specificity = rule.selector.specificity();
                for decl in &rule.declarations {
                    decls.push((decl.important, specificity, order, decl));
                }
            }
        }
    }
    decls.sort_by_key(|&(important, specificity, order, _)| (important, specificity, order));

    for &(_, _, _, decl) in decls.iter().filter(|d| !d.0) {
        apply_declaration(&mut values, decl);
    }

    if let Some(style) = attrs.and_then(|a| a.style_attrs()).and_then(|s| s.style.as_ref()) {
        values.overlay(&style.presentation);
    }

    for &(_, _, _, decl) in decls.iter().filter(|d| d.0) {
        apply_declaration(&mut values, decl);
    }

    values
}

// A node with all its ancestors and their child indices.
#[derive(Clone)]
struct CssNode<'a> {
    chain: Vec<(usize, &'a ParsedElement)>,
}

impl<'a> CssNode<'a> {
    fn elem(&self) -> Option<&'a ParsedElement> {
        self.chain.last().map(|&(_, elem)| elem)
    }
}

impl<'a> simplecss::Element for CssNode<'a> {
    fn parent_element(&self) -> Option<Self> {
        if self.chain.len() < 2 {
            return None;
        }

        let mut chain = self.chain.clone();
        chain.pop();
        Some(CssNode { chain })
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        let len = self.chain.len();
        if len < 2 {
            return None;
        }

        let (idx, _) = *self.chain.get(len - 1)?;
        let (_, parent) = *self.chain.get(len - 2)?;
        let (prev_idx, prev) = parent
            .children()
            .get(..idx)?
            .iter()
            .enumerate()
            .rev()
            .find(|(_, c)| !c.node.is_leaf())?;

        let mut chain = self.chain[..len - 1].to_vec();
        chain.push((prev_idx, prev));
        Some(CssNode { chain })
    }

    fn has_local_name(&self, name: &str) -> bool {
        self.elem().map_or(false, |e| e.tag() == name)
    }

    fn attribute_matches(&self, local_name: &str, operator: AttributeOperator) -> bool {
        match self.elem().and_then(|e| e.attr(local_name)) {
            Some(value) => operator.matches(&value),
            None => false,
        }
    }

    fn pseudo_class_matches(&self, class: PseudoClass) -> bool {
        match class {
            PseudoClass::FirstChild => self.prev_sibling_element().is_none(),
            _ => false,
        }
    }
}
