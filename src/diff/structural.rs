// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::xml::{LosslessElement, LosslessNode, XmlElement, XmlNode};

/// A difference between an original node and an edited one.
#[derive(Debug)]
pub(crate) enum NodeDiff<'a> {
    /// The node kind has changed, so the node is replaced as a whole.
    Replace(&'a LosslessNode),
    /// Both are elements.
    Element(ElementDiff<'a>),
    /// Both are texts, comments or CDATA sections with a different content.
    Content(&'a str),
}

#[derive(Debug)]
pub(crate) struct ElementDiff<'a> {
    pub edited: &'a LosslessElement,
    pub renamed: bool,
    pub attrs: Vec<AttrDiff<'a>>,
    pub children: Vec<ChildDiff<'a>>,
}

#[derive(Debug)]
pub(crate) enum AttrDiff<'a> {
    Added { name: &'a str, value: &'a str },
    Modified { name: &'a str, value: &'a str },
    Deleted { name: &'a str },
}

/// A children list entry.
///
/// Added children are indexed in the edited list, the rest in the original one.
#[derive(Debug)]
pub(crate) enum ChildDiff<'a> {
    Added { index: usize, node: &'a LosslessNode },
    Deleted { index: usize },
    Modified { index: usize, diff: NodeDiff<'a> },
}

/// Deep equality of an original node and an edited one.
///
/// The attribute order is ignored.
pub(crate) fn same_node(orig: &XmlNode, edited: &LosslessNode) -> bool {
    match (orig, edited) {
        (XmlNode::Element(o), LosslessNode::Element(e)) => same_element(o, e),
        (XmlNode::Text(o), LosslessNode::Text(e))
        | (XmlNode::Comment(o), LosslessNode::Comment(e))
        | (XmlNode::Cdata(o), LosslessNode::Cdata(e)) => o.text == *e,
        _ => false,
    }
}

fn same_element(orig: &XmlElement, edited: &LosslessElement) -> bool {
    orig.name == edited.tag
        && orig.attrs == edited.attrs
        && orig.children.len() == edited.children.len()
        && orig
            .children
            .iter()
            .zip(&edited.children)
            .all(|(o, e)| same_node(o, e))
}

pub(crate) fn diff_root<'a>(orig: &'a XmlElement, edited: &'a LosslessNode) -> Option<NodeDiff<'a>> {
    match *edited {
        LosslessNode::Element(ref e) => diff_element(orig, e).map(NodeDiff::Element),
        _ => Some(NodeDiff::Replace(edited)),
    }
}

fn diff_node<'a>(orig: &'a XmlNode, edited: &'a LosslessNode) -> Option<NodeDiff<'a>> {
    match (orig, edited) {
        (XmlNode::Element(o), LosslessNode::Element(e)) => diff_element(o, e).map(NodeDiff::Element),
        (XmlNode::Text(o), LosslessNode::Text(e))
        | (XmlNode::Comment(o), LosslessNode::Comment(e))
        | (XmlNode::Cdata(o), LosslessNode::Cdata(e)) => {
            if o.text == *e {
                None
            } else {
                Some(NodeDiff::Content(e))
            }
        }
        _ => Some(NodeDiff::Replace(edited)),
    }
}

fn diff_element<'a>(orig: &'a XmlElement, edited: &'a LosslessElement) -> Option<ElementDiff<'a>> {
    let mut attrs = Vec::new();
    for (name, value) in &orig.attrs {
        match edited.attrs.get(name) {
            Some(v) if v == value => {}
            Some(v) => attrs.push(AttrDiff::Modified { name, value: v }),
            None => attrs.push(AttrDiff::Deleted { name }),
        }
    }

    for (name, value) in &edited.attrs {
        if !orig.attrs.contains_key(name) {
            attrs.push(AttrDiff::Added { name, value });
        }
    }

    let children = diff_children(&orig.children, &edited.children);
    let renamed = orig.name != edited.tag;

    if !renamed && attrs.is_empty() && children.is_empty() {
        return None;
    }

    Some(ElementDiff {
        edited,
        renamed,
        attrs,
        children,
    })
}

// How well two children match: 2 for equal nodes, 1 for nodes of the same
// kind that can be diffed in place, like elements with the same tag name.
fn match_weight(orig: &XmlNode, edited: &LosslessNode) -> usize {
    if same_node(orig, edited) {
        return 2;
    }

    match (orig, edited) {
        (XmlNode::Element(o), LosslessNode::Element(e)) if o.name == e.tag => 1,
        (XmlNode::Text(_), LosslessNode::Text(_))
        | (XmlNode::Comment(_), LosslessNode::Comment(_))
        | (XmlNode::Cdata(_), LosslessNode::Cdata(_)) => 1,
        _ => 0,
    }
}

// Matched children pairs forming the heaviest common subsequence.
fn common_pairs(orig: &[XmlNode], edited: &[LosslessNode]) -> Vec<(usize, usize)> {
    let n = orig.len();
    let m = edited.len();

    let weights: Vec<Vec<usize>> = orig
        .iter()
        .map(|o| edited.iter().map(|e| match_weight(o, e)).collect())
        .collect();

    // scores[i][j] is the best total weight of orig[i..] and edited[j..]
    let mut scores = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            let mut best = scores[i + 1][j].max(scores[i][j + 1]);
            if weights[i][j] != 0 {
                best = best.max(weights[i][j] + scores[i + 1][j + 1]);
            }
            scores[i][j] = best;
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        let w = weights[i][j];
        if w != 0 && scores[i][j] == w + scores[i + 1][j + 1] {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if scores[i + 1][j] >= scores[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }

    pairs
}

/// Diffs two children lists.
///
/// Equal children and children of the same kind are matched first.
/// Unmatched children between two matched ones are paired by position.
/// Moves are not detected: a moved child is deleted and added.
pub(crate) fn diff_children<'a>(orig: &'a [XmlNode], edited: &'a [LosslessNode]) -> Vec<ChildDiff<'a>> {
    let mut out = Vec::new();

    let mut pairs = common_pairs(orig, edited);
    pairs.push((orig.len(), edited.len()));

    let (mut i0, mut j0) = (0, 0);
    for (i1, j1) in pairs {
        diff_gap(orig, edited, (i0, i1), (j0, j1), &mut out);

        if i1 < orig.len() && j1 < edited.len() {
            if let Some(diff) = diff_node(&orig[i1], &edited[j1]) {
                out.push(ChildDiff::Modified { index: i1, diff });
            }
        }

        i0 = i1 + 1;
        j0 = j1 + 1;
    }

    out
}

fn diff_gap<'a>(
    orig: &'a [XmlNode],
    edited: &'a [LosslessNode],
    (i0, i1): (usize, usize),
    (j0, j1): (usize, usize),
    out: &mut Vec<ChildDiff<'a>>,
) {
    let paired = (i1 - i0).min(j1 - j0);
    for k in 0..paired {
        if let Some(diff) = diff_node(&orig[i0 + k], &edited[j0 + k]) {
            out.push(ChildDiff::Modified { index: i0 + k, diff });
        }
    }

    for index in i0 + paired..i1 {
        out.push(ChildDiff::Deleted { index });
    }

    for index in j0 + paired..j1 {
        out.push(ChildDiff::Added { index, node: &edited[index] });
    }
}
