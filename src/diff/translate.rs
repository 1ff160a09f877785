// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::index::original_index;
use super::structural::{AttrDiff, ChildDiff, ElementDiff, NodeDiff};
use super::{DiffError, XmlDiff};
use crate::xml::{escape_attribute, escape_text, AttrPositions, IntervalKind, XmlElement, XmlNode};
use crate::Interval;

pub(crate) fn root(orig: &XmlElement, diff: &NodeDiff, out: &mut Vec<XmlDiff>) -> Result<(), DiffError> {
    match *diff {
        NodeDiff::Replace(node) => {
            out.push(modify(orig.positions.element, node.to_string()));
            Ok(())
        }
        NodeDiff::Element(ref d) => element(orig, d, out),
        NodeDiff::Content(_) => Err(DiffError::UnexpectedShape(format!(
            "content diff for the root element '{}'",
            orig.name
        ))),
    }
}

fn modify(interval: Interval, text: String) -> XmlDiff {
    XmlDiff::Modify { interval, text }
}

fn element(orig: &XmlElement, diff: &ElementDiff, out: &mut Vec<XmlDiff>) -> Result<(), DiffError> {
    let pos = &orig.positions;

    if diff.renamed {
        out.push(modify(pos.start_tag, diff.edited.tag.clone()));
        if let Some(end_tag) = pos.end_tag {
            out.push(modify(end_tag, diff.edited.tag.clone()));
        }
    }

    for attr in &diff.attrs {
        attribute(orig, attr, out)?;
    }

    if diff.children.is_empty() {
        return Ok(());
    }

    if orig.is_self_closing() {
        return self_closing_children(orig, diff, out);
    }

    children(orig, &diff.children, out)
}

fn attr_positions<'a>(orig: &'a XmlElement, name: &str) -> Result<(usize, &'a AttrPositions), DiffError> {
    orig.positions
        .attrs
        .get_full(name)
        .map(|(idx, _, pos)| (idx, pos))
        .ok_or_else(|| DiffError::MissingAttribute(name.to_string()))
}

fn attribute(orig: &XmlElement, diff: &AttrDiff, out: &mut Vec<XmlDiff>) -> Result<(), DiffError> {
    let pos = &orig.positions;
    match *diff {
        AttrDiff::Added { name, value } => {
            // Right after the closing quote of the last attribute.
            let at = match pos.attrs.last() {
                Some((_, last)) => last.value.end + 1,
                None => pos.start_tag.end,
            };

            out.push(XmlDiff::Add {
                pos: at,
                text: format!(" {}=\"{}\"", name, escape_attribute(value, '"')),
            });
        }
        AttrDiff::Modified { name, value } => {
            let (_, attr) = attr_positions(orig, name)?;
            out.push(modify(attr.value, escape_attribute(value, attr.quote).into_owned()));
        }
        AttrDiff::Deleted { name } => {
            let (idx, attr) = attr_positions(orig, name)?;
            // From the end of the previous attribute or the tag name,
            // so the leading whitespace goes away too.
            let start = match idx.checked_sub(1).and_then(|i| pos.attrs.get_index(i)) {
                Some((_, prev)) => prev.value.end + 1,
                None => pos.start_tag.end,
            };

            out.push(XmlDiff::Delete {
                interval: Interval::new(start, attr.value.end + 1),
            });
        }
    }

    Ok(())
}

// `<a/>` has no place for children, so the whole tail is rewritten.
fn self_closing_children(orig: &XmlElement, diff: &ElementDiff, out: &mut Vec<XmlDiff>) -> Result<(), DiffError> {
    let mut text = String::from(">");
    for child in &diff.children {
        match *child {
            ChildDiff::Added { node, .. } => text.push_str(&node.to_string()),
            _ => {
                return Err(DiffError::UnexpectedShape(format!(
                    "children of the self-closing element '{}' can only be added",
                    orig.name
                )));
            }
        }
    }

    text.push_str("</");
    text.push_str(&diff.edited.tag);
    text.push('>');

    let pos = &orig.positions;
    out.push(modify(Interval::new(pos.open_element.end - 2, pos.element.end), text));
    Ok(())
}

fn children(orig: &XmlElement, diffs: &[ChildDiff], out: &mut Vec<XmlDiff>) -> Result<(), DiffError> {
    let len = orig.children.len();

    let mut added = Vec::new();
    let mut deleted = Vec::new();
    for d in diffs {
        match *d {
            ChildDiff::Added { index, .. } => added.push(index),
            ChildDiff::Deleted { index } => deleted.push(index),
            ChildDiff::Modified { .. } => {}
        }
    }

    // Edits are emitted in the original document order. Insertions go
    // before the changes of the child they precede.
    let mut ordered: Vec<((usize, u8, usize), &ChildDiff)> = diffs
        .iter()
        .map(|d| {
            let key = match *d {
                ChildDiff::Added { index, .. } => (original_index(index, &added, &deleted), 0, index),
                ChildDiff::Deleted { index } | ChildDiff::Modified { index, .. } => (index, 1, index),
            };
            (key, d)
        })
        .collect();
    ordered.sort_by_key(|&(key, _)| key);

    for ((o, _, _), d) in ordered {
        match *d {
            ChildDiff::Added { node, .. } => {
                if o > len {
                    return Err(DiffError::ChildOutOfRange { index: o, len });
                }

                let at = if o == 0 {
                    orig.interval(IntervalKind::Inner).start
                } else {
                    orig.children[o - 1].interval(IntervalKind::Outer).end
                };

                out.push(XmlDiff::Add { pos: at, text: node.to_string() });
            }
            ChildDiff::Deleted { index } => {
                let child = get_child(orig, index)?;
                out.push(XmlDiff::Delete { interval: child.interval(IntervalKind::Outer) });
            }
            ChildDiff::Modified { index, ref diff } => {
                let child = get_child(orig, index)?;
                modified_child(child, diff, out)?;
            }
        }
    }

    Ok(())
}

fn get_child(orig: &XmlElement, index: usize) -> Result<&XmlNode, DiffError> {
    orig.children.get(index).ok_or(DiffError::ChildOutOfRange {
        index,
        len: orig.children.len(),
    })
}

fn modified_child(child: &XmlNode, diff: &NodeDiff, out: &mut Vec<XmlDiff>) -> Result<(), DiffError> {
    match (diff, child) {
        (&NodeDiff::Replace(node), _) => {
            out.push(modify(child.interval(IntervalKind::Outer), node.to_string()));
            Ok(())
        }
        (&NodeDiff::Element(ref d), &XmlNode::Element(ref e)) => element(e, d, out),
        // The whole raw text is replaced, including whitespace removed by trimming.
        (&NodeDiff::Content(text), &XmlNode::Text(ref t)) => {
            out.push(modify(t.interval, escape_text(text).into_owned()));
            Ok(())
        }
        (&NodeDiff::Content(text), &XmlNode::Comment(_))
        | (&NodeDiff::Content(text), &XmlNode::Cdata(_)) => {
            out.push(modify(child.interval(IntervalKind::Inner), text.to_string()));
            Ok(())
        }
        _ => Err(DiffError::UnexpectedShape(format!(
            "{} diff for {}",
            diff_kind(diff),
            node_kind(child)
        ))),
    }
}

fn diff_kind(diff: &NodeDiff) -> &'static str {
    match *diff {
        NodeDiff::Replace(_) => "a replace",
        NodeDiff::Element(_) => "an element",
        NodeDiff::Content(_) => "a content",
    }
}

fn node_kind(node: &XmlNode) -> &'static str {
    match *node {
        XmlNode::Element(_) => "an element",
        XmlNode::Text(_) => "a text",
        XmlNode::Comment(_) => "a comment",
        XmlNode::Cdata(_) => "a CDATA section",
    }
}

#[cfg(test)]
mod tests {
    use crate::diff::{apply, diff, XmlDiff};
    use crate::xml::{self, LosslessElement, LosslessNode};
    use crate::Interval;
    use pretty_assertions::assert_eq;

    fn edit<F: FnOnce(&mut LosslessElement)>(text: &str, f: F) -> (Vec<XmlDiff>, String) {
        let root = xml::parse(text).unwrap().unwrap();
        let mut edited = root.to_lossless();
        f(&mut edited);
        let edited = LosslessNode::Element(edited);
        let diffs = diff(&root, &edited).unwrap();
        let patched = apply(text, &diffs).unwrap();
        assert_eq!(
            xml::parse(&patched).unwrap().unwrap().to_lossless(),
            *edited.as_element().unwrap()
        );
        (diffs, patched)
    }

    fn child(e: &mut LosslessElement, idx: usize) -> &mut LosslessElement {
        match e.children[idx] {
            LosslessNode::Element(ref mut e) => e,
            _ => panic!("expected element"),
        }
    }

    #[test]
    fn modify_attribute_keeps_quote() {
        let (diffs, patched) = edit("<svg>\n  <rect width='10' height=\"5\"/>\n</svg>", |svg| {
            child(svg, 1).attrs.insert("width".to_string(), "it's".to_string());
        });
        assert_eq!(
            diffs,
            vec![XmlDiff::Modify { interval: Interval::new(21, 23), text: "it&apos;s".to_string() }]
        );
        assert_eq!(patched, "<svg>\n  <rect width='it&apos;s' height=\"5\"/>\n</svg>");
    }

    #[test]
    fn delete_attribute() {
        let (diffs, patched) = edit("<rect  x=\"1\"   y=\"2\" />", |rect| {
            rect.attrs.shift_remove("x");
        });
        assert_eq!(diffs, vec![XmlDiff::Delete { interval: Interval::new(5, 12) }]);
        assert_eq!(patched, "<rect   y=\"2\" />");
    }

    #[test]
    fn delete_last_attribute() {
        let (_, patched) = edit("<rect x=\"1\" y=\"2\"/>", |rect| {
            rect.attrs.shift_remove("y");
        });
        assert_eq!(patched, "<rect x=\"1\"/>");
    }

    #[test]
    fn add_attribute_without_attributes() {
        let (_, patched) = edit("<g></g>", |g| {
            g.attrs.insert("id".to_string(), "a&b".to_string());
        });
        assert_eq!(patched, "<g id=\"a&amp;b\"></g>");
    }

    #[test]
    fn rename() {
        let (_, patched) = edit("<svg><g x=\"1\">\n</g></svg>", |svg| {
            child(svg, 0).tag = "a".to_string();
        });
        assert_eq!(patched, "<svg><a x=\"1\">\n</a></svg>");
    }

    #[test]
    fn insert_children() {
        let text = "<svg>\n  <rect/>\n  <circle/>\n</svg>";
        let (_, patched) = edit(text, |svg| {
            svg.children.insert(0, LosslessNode::Element(LosslessElement::new("a")));
            svg.children.insert(3, LosslessNode::Element(LosslessElement::new("b")));
            svg.children.push(LosslessNode::Comment("end".to_string()));
        });
        assert_eq!(patched, "<svg><a/>\n  <rect/><b/>\n  <circle/>\n<!--end--></svg>");
    }

    #[test]
    fn delete_child() {
        let (_, patched) = edit("<svg><rect/><!--c--><circle/></svg>", |svg| {
            svg.children.remove(0);
        });
        assert_eq!(patched, "<svg><!--c--><circle/></svg>");
    }

    #[test]
    fn replace_child() {
        let (_, patched) = edit("<svg><rect/>text<circle/></svg>", |svg| {
            svg.children[1] = LosslessNode::Element(LosslessElement::new("g"));
        });
        assert_eq!(patched, "<svg><rect/><g/><circle/></svg>");
    }

    #[test]
    fn modify_text() {
        let (_, patched) = edit("<text>a<!--b--><![CDATA[c]]></text>", |text| {
            text.children[0] = LosslessNode::Text("1 < 2".to_string());
            text.children[1] = LosslessNode::Comment("3".to_string());
            text.children[2] = LosslessNode::Cdata("<4>".to_string());
        });
        assert_eq!(patched, "<text>1 &lt; 2<!--3--><![CDATA[<4>]]></text>");
    }

    #[test]
    fn nested() {
        let (_, patched) = edit("<svg><g><rect width=\"1\"/></g></svg>", |svg| {
            let g = child(svg, 0);
            child(g, 0).attrs.insert("width".to_string(), "2".to_string());
            g.children.push(LosslessNode::Element(LosslessElement::new("circle")));
        });
        assert_eq!(patched, "<svg><g><rect width=\"2\"/><circle/></g></svg>");
    }

    #[test]
    fn self_closing_with_attributes() {
        let (_, patched) = edit("<g x=\"1\" />", |g| {
            g.attrs.insert("y".to_string(), "2".to_string());
            g.children.push(LosslessNode::Text("t".to_string()));
        });
        assert_eq!(patched, "<g x=\"1\" y=\"2\" >t</g>");
    }
}
