// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;

use super::{AttrValue, ParsedElement, ParsedNode};
use crate::xml::{LosslessElement, LosslessNode};
use crate::{FixPrecision, ToStringWithOptions, WriteOptions};

impl ParsedElement {
    /// Projects the node into a position-free snapshot.
    ///
    /// Attributes keep their source order. New attributes are appended
    /// in the record order, followed by the new unknown ones.
    pub fn to_lossless(&self, opt: &WriteOptions) -> LosslessNode {
        match self.node {
            ParsedNode::TextContent(ref text) => LosslessNode::Text(text.clone()),
            ParsedNode::Comment(ref text) => LosslessNode::Comment(text.clone()),
            ParsedNode::Cdata(ref text) => LosslessNode::Cdata(text.clone()),
            _ => LosslessNode::Element(LosslessElement {
                tag: self.tag().to_string(),
                attrs: self.lossless_attrs(opt),
                children: self.children().iter().map(|c| c.to_lossless(opt)).collect(),
            }),
        }
    }

    fn lossless_attrs(&self, opt: &WriteOptions) -> IndexMap<String, String> {
        let mut typed = Vec::new();
        if let Some(attrs) = self.attrs() {
            attrs.collect_attrs(&mut typed);
        }

        let mut values: IndexMap<&str, String> = typed
            .iter()
            .map(|(name, value)| (*name, self.write_value(name, value, opt)))
            .collect();

        let empty = IndexMap::new();
        let unknown = self.node.unknown_attrs().unwrap_or(&empty);

        let mut attrs = IndexMap::new();
        for name in self.source_attrs.keys() {
            if let Some(value) = values.shift_remove(name.as_str()) {
                attrs.insert(name.clone(), value);
            } else if let Some(value) = unknown.get(name).or_else(|| self.rejected.get(name)) {
                attrs.insert(name.clone(), value.clone());
            }
        }

        for (name, value) in values {
            attrs.insert(name.to_string(), value);
        }

        for (name, value) in unknown {
            if !attrs.contains_key(name) {
                attrs.insert(name.clone(), value.clone());
            }
        }

        attrs
    }

    // Keeps the source text when it still decodes to the same value.
    fn write_value(&self, name: &str, value: &AttrValue, opt: &WriteOptions) -> String {
        if opt.preserve_source_values {
            if let Some(raw) = self.source_attrs.get(name) {
                if value.matches_raw(name, raw) {
                    return raw.clone();
                }
            }
        }

        match opt.precision {
            Some(digits) => value.fix_precision(digits).to_string_with_opt(opt),
            None => value.to_string_with_opt(opt),
        }
    }
}
