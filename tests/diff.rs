// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use pretty_assertions::assert_eq;

use svgedit::diff::{self, DiffError, XmlDiff};
use svgedit::svg::{Element, ParsedElement, ParsedNode};
use svgedit::xml::{self, LosslessElement, LosslessNode, XmlNode};
use svgedit::{Document, Interval, ParseOptions, WriteOptions};

fn edit_xml<F: FnOnce(&mut LosslessElement)>(text: &str, f: F) -> Vec<XmlDiff> {
    let root = xml::parse(text).unwrap().unwrap();
    let mut edited = root.to_lossless();
    f(&mut edited);
    diff::diff(&root, &LosslessNode::Element(edited)).unwrap()
}

// Applies the document diff and checks that the new text parses back
// into the same snapshot.
fn check_round_trip(doc: &Document, opt: &ParseOptions) -> String {
    let wopt = WriteOptions::default();
    let diffs = doc.diff(&wopt).unwrap();
    let text = doc.apply(&diffs).unwrap();

    let reparsed = Document::parse_with_opt(&text, opt).unwrap();
    assert_eq!(reparsed.snapshot(&wopt), doc.snapshot(&wopt));
    assert!(reparsed.diff(&wopt).unwrap().is_empty());

    text
}

fn element<F: FnOnce(&mut ParsedElement)>(node: ParsedNode, f: F) -> ParsedElement {
    let mut e = ParsedElement::new(node);
    f(&mut e);
    e
}

#[test]
fn add_attribute_after_last_one() {
    let diffs = edit_xml("<svg><circle cx=\"50\" cy=\"50\"/></svg>", |svg| {
        if let LosslessNode::Element(ref mut circle) = svg.children[0] {
            circle.attrs.insert("r".to_string(), "40".to_string());
        }
    });

    assert_eq!(diffs, vec![XmlDiff::Add { pos: 28, text: " r=\"40\"".to_string() }]);
}

#[test]
fn add_child_to_empty_self_closing() {
    let diffs = edit_xml("<a/>", |a| {
        a.children.push(LosslessNode::Element(LosslessElement::new("b")));
    });

    assert_eq!(
        diffs,
        vec![XmlDiff::Modify { interval: Interval::new(2, 4), text: "><b/></a>".to_string() }]
    );
}

#[test]
fn rename_element() {
    let text = "<svg>\n  <g id=\"a\">\n  </g>\n</svg>";
    let diffs = edit_xml(text, |svg| {
        if let LosslessNode::Element(ref mut g) = svg.children[1] {
            g.tag = "a".to_string();
        }
    });

    assert_eq!(diffs.len(), 2);
    assert_eq!(diff::apply(text, &diffs).unwrap(), "<svg>\n  <a id=\"a\">\n  </a>\n</svg>");
}

#[test]
fn replace_root_with_text() {
    let diffs = diff::diff(
        &xml::parse("<a><b/></a>").unwrap().unwrap(),
        &LosslessNode::Text("x".to_string()),
    )
    .unwrap();
    assert_eq!(
        diffs,
        vec![XmlDiff::Modify { interval: Interval::new(0, 11), text: "x".to_string() }]
    );
}

#[test]
fn self_closing_contract_violation() {
    // A self-closing element can only gain children. A snapshot that was not
    // made from the same tree can break that.
    let mut root = xml::parse("<a/>").unwrap().unwrap();
    let edited = LosslessNode::Element(root.to_lossless());
    root.children.push(XmlNode::Element(xml::parse("<b/>").unwrap().unwrap()));

    match diff::diff(&root, &edited) {
        Err(DiffError::UnexpectedShape(_)) => {}
        r => panic!("unexpected result: {:?}", r),
    }
}

#[test]
fn overlapping_edits() {
    let diffs = [
        XmlDiff::Delete { interval: Interval::new(0, 3) },
        XmlDiff::Modify { interval: Interval::new(2, 4), text: String::new() },
    ];
    assert!(matches!(diff::apply("<a/>", &diffs), Err(DiffError::Overlap { .. })));
}

#[test]
fn untouched_formatting_survives() {
    let text = "<?xml version=\"1.0\"?>\n\
                <!-- header -->\n\
                <svg   width = '100'  height=\"100\">\n\
                \x20   <rect x=\"1.000\" y=\"2\"\tfill=\"RED\"/>   <!-- note -->\n\
                \x20   <circle cx=\"5\" cy=\"5\" r=\"1\"/>\n\
                </svg>\n";
    let mut doc = Document::parse(text).unwrap();
    doc.find_mut("/svg/circle").unwrap().set_attr("r", "2.5").unwrap();

    let result = check_round_trip(&doc, &ParseOptions::default());
    assert_eq!(result, text.replace("r=\"1\"", "r=\"2.5\""));
}

#[test]
fn scenario_edits_round_trip() {
    let text = "<svg xmlns=\"http://www.w3.org/2000/svg\">\n\
                \x20 <g id=\"layer\" transform=\"translate(10)\">\n\
                \x20   <rect width=\"10\" height=\"10\" foo=\"bar\"/>\n\
                \x20   <text x=\"1\">Hello</text>\n\
                \x20 </g>\n\
                \x20 <path d=\"M0 0 L10 10\"/>\n\
                \x20 <defs/>\n\
                </svg>";
    let mut doc = Document::parse(text).unwrap();

    {
        let g = doc.find_mut("/svg/g").unwrap();
        g.remove_attr("transform");
        g.set_attr("opacity", "0.5").unwrap();
    }
    {
        let rect = doc.find_mut("/svg/g/rect").unwrap();
        rect.remove_attr("foo");
        rect.set_attr("fill", "url(#grad)").unwrap();
    }
    {
        let text_elem = doc.find_mut("/svg/g/text").unwrap();
        text_elem.children_mut().unwrap()[0] = ParsedElement::new_text("a < b");
    }
    {
        let defs = doc.find_mut("/svg/defs").unwrap();
        let stop = element(ParsedNode::Stop(Element::new()), |s| {
            s.set_attr("offset", "0").unwrap();
        });
        let grad = element(ParsedNode::LinearGradient(Element::new()), |g| {
            g.set_attr("id", "grad").unwrap();
            g.children_mut().unwrap().push(stop);
        });
        defs.children_mut().unwrap().push(grad);
    }
    {
        let root = doc.root_mut();
        let children = root.children_mut().unwrap();
        children.remove(1);
        children.insert(0, ParsedElement::new(ParsedNode::Comment(" edited ".to_string())));
    }
    doc.update_xpaths();

    let result = check_round_trip(&doc, &ParseOptions::default());
    assert_eq!(
        result,
        "<svg xmlns=\"http://www.w3.org/2000/svg\"><!-- edited -->\n\
         \x20 <g id=\"layer\" opacity=\"0.5\">\n\
         \x20   <rect width=\"10\" height=\"10\" fill=\"url(#grad)\"/>\n\
         \x20   <text x=\"1\">a &lt; b</text>\n\
         \x20 </g>\n\
         \x20 \n\
         \x20 <defs><linearGradient id=\"grad\"><stop offset=\"0\"/></linearGradient></defs>\n\
         </svg>"
    );
}

#[test]
fn round_trip_without_trimming() {
    let opt = ParseOptions {
        trim_whitespace: false,
        keep_comments: true,
    };
    let text = "<svg>\n  <g>\n    <rect/>\n  </g>\n  <!-- c -->\n</svg>";
    let mut doc = Document::parse_with_opt(text, &opt).unwrap();
    {
        let g = doc.find_mut("/svg/g").unwrap();
        let children = g.children_mut().unwrap();
        children.push(ParsedElement::new(ParsedNode::Circle(Element::new())));
        children.push(ParsedElement::new_text("\n  "));
    }
    doc.update_xpaths();

    let result = check_round_trip(&doc, &opt);
    assert_eq!(result, "<svg>\n  <g>\n    <rect/>\n  <circle/>\n  </g>\n  <!-- c -->\n</svg>");
}

#[test]
fn precision_applies_to_edited_values_only() {
    let text = "<svg><rect x=\"1.23456\" y=\"1.5\"/></svg>";
    let mut doc = Document::parse(text).unwrap();
    doc.find_mut("/svg/rect").unwrap().set_attr("width", "3.14159").unwrap();

    let opt = WriteOptions {
        precision: Some(2),
        ..WriteOptions::default()
    };
    let diffs = doc.diff(&opt).unwrap();
    assert_eq!(
        doc.apply(&diffs).unwrap(),
        "<svg><rect x=\"1.23456\" y=\"1.5\" width=\"3.14\"/></svg>"
    );
}

#[test]
fn invalid_view_box_survives_untouched() {
    let text = "<svg viewBox=\"0 0 10\"><rect/></svg>";
    let mut doc = Document::parse(text).unwrap();
    assert_eq!(doc.warnings().len(), 1);
    assert_eq!(doc.root().attr("viewBox").as_deref(), Some("0 0 10"));
    assert!(doc.diff(&WriteOptions::default()).unwrap().is_empty());

    doc.root_mut().set_attr("viewBox", "0 0 10 10").unwrap();
    let diffs = doc.diff(&WriteOptions::default()).unwrap();
    assert_eq!(doc.apply(&diffs).unwrap(), "<svg viewBox=\"0 0 10 10\"><rect/></svg>");

    doc.root_mut().remove_attr("viewBox");
    let diffs = doc.diff(&WriteOptions::default()).unwrap();
    assert_eq!(doc.apply(&diffs).unwrap(), "<svg><rect/></svg>");
}
