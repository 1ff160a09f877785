// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::diff::{self, XmlDiff};
use crate::dom;
use crate::svg::{self, ParsedElement, PresentationAttrs, Stylesheet};
use crate::xml::{self, LosslessNode, XmlElement};
use crate::{Error, LookupError, ParseOptions, Warning, WriteOptions};

/// An editable SVG document.
///
/// Keeps the source text, the positioned XML tree it was parsed into and
/// the semantic tree built on top of it. The semantic tree can be freely
/// edited and then turned into a list of text edits against the source.
///
/// # Example
///
/// ```
/// use svgedit::{Document, WriteOptions};
///
/// let text = "<svg><circle cx=\"50\" cy=\"50\"/></svg>";
/// let mut doc = Document::parse(text).unwrap();
/// doc.find_mut("/svg/circle").unwrap().set_attr("r", "40").unwrap();
///
/// let diffs = doc.diff(&WriteOptions::default()).unwrap();
/// assert_eq!(
///     doc.apply(&diffs).unwrap(),
///     "<svg><circle cx=\"50\" cy=\"50\" r=\"40\"/></svg>"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Document {
    text: String,
    xml: XmlElement,
    root: ParsedElement,
    warns: Vec<Warning>,
}

impl Document {
    /// Parses a document using default options.
    pub fn parse(text: &str) -> Result<Document, Error> {
        Document::parse_with_opt(text, &ParseOptions::default())
    }

    /// Parses a document.
    ///
    /// Only malformed XML is an error. All semantic problems are collected
    /// as warnings.
    pub fn parse_with_opt(text: &str, opt: &ParseOptions) -> Result<Document, Error> {
        let mut xml = xml::parse(text)?.ok_or(Error::EmptyDocument)?;

        if opt.trim_whitespace {
            xml::trim(&mut xml);
        }

        if !opt.keep_comments {
            xml::strip_comments(&mut xml);
        }

        let parsed = svg::parse(&xml);

        Ok(Document {
            text: text.to_string(),
            xml,
            root: parsed.result,
            warns: parsed.warns,
        })
    }

    /// Returns the source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the positioned tree the source text was parsed into.
    pub fn xml(&self) -> &XmlElement {
        &self.xml
    }

    /// Returns the semantic root.
    pub fn root(&self) -> &ParsedElement {
        &self.root
    }

    /// Returns the mutable semantic root.
    ///
    /// Call [`update_xpaths`] after changing the children structure.
    ///
    /// [`update_xpaths`]: #method.update_xpaths
    pub fn root_mut(&mut self) -> &mut ParsedElement {
        &mut self.root
    }

    /// Returns parsing warnings in the document order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warns
    }

    /// Recalculates node addresses after a structural edit.
    pub fn update_xpaths(&mut self) {
        dom::update_xpaths(&mut self.root);
        svg::invalidate_virtual_boxes(&mut self.root);
    }

    /// Finds a node by its address.
    pub fn find(&self, address: &str) -> Option<&ParsedElement> {
        dom::find(&self.root, address)
    }

    /// Finds a node by its address.
    pub fn find_mut(&mut self, address: &str) -> Option<&mut ParsedElement> {
        dom::find_mut(&mut self.root, address)
    }

    /// Finds a node by its address or fails with the address.
    pub fn find_exn(&self, address: &str) -> Result<&ParsedElement, LookupError> {
        dom::find_exn(&self.root, address)
    }

    /// Finds the first element with the specified `id` in the document order.
    pub fn find_by_id(&self, id: &str) -> Option<&ParsedElement> {
        dom::find_elem_by_id(&self.root, id)
    }

    /// Finds an element by its `id` or fails with the `id`.
    pub fn find_by_id_exn(&self, id: &str) -> Result<&ParsedElement, LookupError> {
        dom::find_elem_by_id_exn(&self.root, id)
    }

    /// Returns the effective presentation attributes of a node.
    ///
    /// `<style>` elements are collected on each call.
    pub fn presentation(&self, address: &str) -> Option<PresentationAttrs> {
        Stylesheet::from_tree(&self.root).resolve_presentation(&self.root, address)
    }

    /// Projects the current semantic tree into a position-free snapshot.
    pub fn snapshot(&self, opt: &WriteOptions) -> LosslessNode {
        self.root.to_lossless(opt)
    }

    /// Computes text edits that turn the source text into the current tree.
    pub fn diff(&self, opt: &WriteOptions) -> Result<Vec<XmlDiff>, Error> {
        let snapshot = self.snapshot(opt);
        let diffs = diff::diff(&self.xml, &snapshot)?;
        Ok(diffs)
    }

    /// Applies text edits to the source text.
    pub fn apply(&self, diffs: &[XmlDiff]) -> Result<String, Error> {
        let text = diff::apply(&self.text, diffs)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interval;

    #[test]
    fn empty_document() {
        match Document::parse("<?xml version=\"1.0\"?>\n<!-- nothing -->") {
            Err(Error::EmptyDocument) => {}
            ref r => panic!("unexpected result: {:?}", r.as_ref().map(|d| d.text())),
        }
    }

    #[test]
    fn malformed_document() {
        assert!(matches!(Document::parse("<svg><g></svg>"), Err(Error::Xml(_))));
    }

    #[test]
    fn unchanged_document_has_no_diffs() {
        let doc = Document::parse("<svg>\n  <rect  width='10.0'/>\n  <!-- c -->\n</svg>").unwrap();
        assert!(doc.diff(&WriteOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn without_comments() {
        let text = "<svg><!--a--><rect/></svg>";
        let opt = ParseOptions { keep_comments: false, ..ParseOptions::default() };
        let mut doc = Document::parse_with_opt(text, &opt).unwrap();
        assert_eq!(doc.root().children().len(), 1);
        assert!(doc.diff(&WriteOptions::default()).unwrap().is_empty());

        doc.find_mut("/svg/rect").unwrap().set_attr("x", "1").unwrap();
        let diffs = doc.diff(&WriteOptions::default()).unwrap();
        assert_eq!(doc.apply(&diffs).unwrap(), "<svg><!--a--><rect x=\"1\"/></svg>");
    }

    #[test]
    fn warnings() {
        let doc = Document::parse("<svg width=\"abc\"/>").unwrap();
        assert_eq!(doc.warnings().len(), 1);
        assert_eq!(doc.warnings()[0].interval, Interval::new(12, 15));
    }

    #[test]
    fn structural_edit() {
        let mut doc = Document::parse("<svg>\n  <g/>\n</svg>").unwrap();
        if let Some(children) = doc.root_mut().children_mut() {
            children.insert(0, ParsedElement::new_text("title"));
        }
        doc.update_xpaths();
        assert_eq!(doc.root().children()[1].xpath, "/svg/g");

        let diffs = doc.diff(&WriteOptions::default()).unwrap();
        assert_eq!(doc.apply(&diffs).unwrap(), "<svg>title\n  <g/>\n</svg>");
    }
}
