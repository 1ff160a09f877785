// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Maps an edited children list index to an original one.
///
/// `added` contains edited indices of inserted children and `deleted`
/// contains original indices of removed ones. The result is the index of
/// the original child the new one must be inserted before. It is equal to
/// the original length when the child goes to the end.
pub(crate) fn original_index(dest: usize, added: &[usize], deleted: &[usize]) -> usize {
    // The number of kept children that precede `dest` in the edited list.
    let mut kept = dest - added.iter().filter(|&&i| i < dest).count();

    let mut idx = 0;
    loop {
        if deleted.contains(&idx) {
            idx += 1;
            continue;
        }

        if kept == 0 {
            return idx;
        }

        kept -= 1;
        idx += 1;
    }
}
