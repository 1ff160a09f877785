// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::xml::{AttrPositions, XmlElement};
use crate::{Accept, Interval, Warning};

/// An owned table of attributes not yet claimed by an element record.
///
/// Each successful claim removes the attribute from the table.
/// Whatever is left after all claims is swept into the `unknown` bucket.
pub struct AttrClaims<'a> {
    remaining: IndexMap<String, String>,
    positions: &'a IndexMap<String, AttrPositions>,
    fallback: Interval,
    reported: HashSet<String>,
    rejected: IndexMap<String, String>,
    warns: &'a mut Vec<Warning>,
}

impl<'a> AttrClaims<'a> {
    pub fn new(elem: &'a XmlElement, warns: &'a mut Vec<Warning>) -> Self {
        AttrClaims {
            remaining: elem.attrs.clone(),
            positions: &elem.positions.attrs,
            fallback: elem.positions.start_tag,
            reported: HashSet::new(),
            rejected: IndexMap::new(),
            warns,
        }
    }

    fn value_interval(&self, name: &str) -> Interval {
        self.positions.get(name).map(|p| p.value).unwrap_or(self.fallback)
    }

    fn push_warning(&mut self, interval: Interval, message: String) {
        warn!("{} at {}.", message, interval);
        self.warns.push(Warning::new(interval, message));
    }

    /// Claims and decodes an attribute.
    ///
    /// An invalid value is reported at the value interval and is left
    /// in the table, unless the type is consumed on error. Consumed
    /// invalid values are moved to the rejected list.
    pub fn claim<T: Accept>(&mut self, name: &str) -> Option<T> {
        let interval = self.value_interval(name);
        let res = {
            let raw = self.remaining.get(name)?;
            T::accept_reporting(raw, name, interval, self.warns)
        };

        match res {
            Ok(v) => {
                self.remaining.shift_remove(name);
                Some(v)
            }
            Err(e) => {
                let msg = format!("invalid '{}' attribute: {}", name, e);
                self.push_warning(interval, msg);
                self.reported.insert(name.to_string());
                if T::CONSUMED_ON_ERROR {
                    if let Some(raw) = self.remaining.shift_remove(name) {
                        self.rejected.insert(name.to_string(), raw);
                    }
                }
                None
            }
        }
    }

    /// Takes the raw values of attributes consumed with an invalid value.
    pub fn take_rejected(&mut self) -> IndexMap<String, String> {
        std::mem::take(&mut self.rejected)
    }

    /// Sweeps unclaimed attributes, reporting the ones that weren't reported yet.
    pub fn finish(mut self) -> IndexMap<String, String> {
        let names: Vec<String> = self
            .remaining
            .keys()
            .filter(|name| !self.reported.contains(*name))
            .cloned()
            .collect();

        for name in names {
            let interval = self.value_interval(&name);
            self.push_warning(interval, format!("unknown attribute '{}'", name));
        }

        self.remaining
    }
}
