// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use super::traverse;
use crate::svg::ParsedElement;
use crate::LookupError;

/// Recomputes `xpath` and `parent` of every node.
///
/// Must be called after any structural edit.
pub fn update_xpaths(root: &mut ParsedElement) {
    root.xpath = format!("/{}", root.tag());
    root.parent = None;
    update_children(root);
}

fn update_children(elem: &mut ParsedElement) {
    let xpath = elem.xpath.clone();
    let children = match elem.children_mut() {
        Some(children) => children,
        None => return,
    };

    let mut totals: HashMap<String, usize> = HashMap::new();
    for child in children.iter() {
        *totals.entry(child.tag().to_string()).or_insert(0) += 1;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for child in children.iter_mut() {
        let tag = child.tag().to_string();
        let idx = seen.entry(tag.clone()).or_insert(0);
        *idx += 1;

        child.xpath = if totals.get(&tag).copied().unwrap_or(0) > 1 {
            format!("{}/{}[{}]", xpath, tag, idx)
        } else {
            format!("{}/{}", xpath, tag)
        };
        child.parent = Some(xpath.clone());

        update_children(child);
    }
}

// `tag` or `tag[k]`.
fn parse_segment(segment: &str) -> Option<(&str, usize)> {
    if let Some(body) = segment.strip_suffix(']') {
        let open = body.rfind('[')?;
        let idx: usize = body[open + 1..].parse().ok()?;
        if idx == 0 {
            return None;
        }
        Some((&body[..open], idx))
    } else if segment.is_empty() {
        None
    } else {
        Some((segment, 1))
    }
}

/// Resolves an address into a list of child indices starting at `root`.
///
/// The root itself is addressed by an empty list.
pub fn find_path(root: &ParsedElement, address: &str) -> Option<Vec<usize>> {
    let mut segments = address.strip_prefix('/')?.split('/');

    let (tag, idx) = parse_segment(segments.next()?)?;
    if tag != root.tag() || idx != 1 {
        return None;
    }

    let mut node = root;
    let mut path = Vec::new();
    for segment in segments {
        let (tag, idx) = parse_segment(segment)?;
        let (pos, child) = node
            .children()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.tag() == tag)
            .nth(idx - 1)?;
        path.push(pos);
        node = child;
    }

    Some(path)
}

/// Finds a node by its address.
pub fn find<'a>(root: &'a ParsedElement, address: &str) -> Option<&'a ParsedElement> {
    let path = find_path(root, address)?;
    let mut node = root;
    for idx in path {
        node = node.children().get(idx)?;
    }
    Some(node)
}

/// Finds a node by its address.
pub fn find_mut<'a>(root: &'a mut ParsedElement, address: &str) -> Option<&'a mut ParsedElement> {
    let path = find_path(root, address)?;
    let mut node = root;
    for idx in path {
        node = node.children_mut()?.get_mut(idx)?;
    }
    Some(node)
}

/// Finds a node by an address that is known to exist.
pub fn find_exn<'a>(root: &'a ParsedElement, address: &str) -> Result<&'a ParsedElement, LookupError> {
    find(root, address).ok_or_else(|| LookupError::AddressNotFound(address.to_string()))
}

/// Finds the first element with the specified `id` in document order.
pub fn find_elem_by_id<'a>(root: &'a ParsedElement, id: &str) -> Option<&'a ParsedElement> {
    traverse(root, |node| if node.id() == Some(id) { Some(node) } else { None })
}

/// Finds an element by an `id` that is known to exist.
pub fn find_elem_by_id_exn<'a>(root: &'a ParsedElement, id: &str) -> Result<&'a ParsedElement, LookupError> {
    find_elem_by_id(root, id).ok_or_else(|| LookupError::IdNotFound(id.to_string()))
}
