// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{DiffError, XmlDiff};
use crate::Interval;

/// Applies text edits to the original text.
///
/// Edits can be passed in any order, but must not overlap. Insertions at
/// the same position are applied in the passed order, before an edit
/// that starts at that position.
pub fn apply(text: &str, diffs: &[XmlDiff]) -> Result<String, DiffError> {
    let mut sorted: Vec<&XmlDiff> = diffs.iter().collect();
    sorted.sort_by_key(|d| (d.interval().start, !matches!(**d, XmlDiff::Add { .. })));

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for d in sorted {
        let interval = d.interval();
        if interval.start < cursor {
            return Err(DiffError::Overlap { interval, cursor });
        }

        out.push_str(slice(text, Interval::new(cursor, interval.start))?);
        // Checks the bounds of the removed text too.
        slice(text, interval)?;

        if let Some(s) = d.text() {
            out.push_str(s);
        }

        cursor = interval.end;
    }

    out.push_str(slice(text, Interval::new(cursor, text.len()))?);
    Ok(out)
}

fn slice(text: &str, interval: Interval) -> Result<&str, DiffError> {
    if interval.start > interval.end {
        return Err(DiffError::OutOfBounds { interval });
    }

    text.get(interval.range()).ok_or(DiffError::OutOfBounds { interval })
}
