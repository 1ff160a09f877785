// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::svg::ParsedElement;

/// A pre-order iterator over a node and all its descendants.
pub struct Descendants<'a> {
    stack: Vec<&'a ParsedElement>,
}

impl<'a> Descendants<'a> {
    /// Constructs a new iterator starting at `node`.
    pub fn new(node: &'a ParsedElement) -> Descendants<'a> {
        Descendants { stack: vec![node] }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ParsedElement;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl ParsedElement {
    /// Returns an iterator over the node and all its descendants in document order.
    pub fn descendants(&self) -> Descendants {
        Descendants::new(self)
    }
}

/// Visits nodes in pre-order until `visitor` returns `Some`.
pub fn traverse<'a, T, F>(node: &'a ParsedElement, visitor: F) -> Option<T>
where
    F: FnMut(&'a ParsedElement) -> Option<T>,
{
    node.descendants().find_map(visitor)
}

/// Mutable version of [`traverse`].
pub fn traverse_mut<T, F>(node: &mut ParsedElement, mut visitor: F) -> Option<T>
where
    F: FnMut(&mut ParsedElement) -> Option<T>,
{
    fn visit<T, F>(node: &mut ParsedElement, visitor: &mut F) -> Option<T>
    where
        F: FnMut(&mut ParsedElement) -> Option<T>,
    {
        if let Some(v) = visitor(node) {
            return Some(v);
        }

        if let Some(children) = node.children_mut() {
            for child in children {
                if let Some(v) = visit(child, visitor) {
                    return Some(v);
                }
            }
        }

        None
    }

    visit(node, &mut visitor)
}
