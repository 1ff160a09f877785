// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Addressing and traversal of the parsed tree.
//!
//! An address looks like `/svg/g[2]/rect`. The `[k]` index is 1-based and
//! is present only when the parent has more than one child with the same tag.
//! Addresses are invalidated by any structural edit and must be refreshed
//! with [`update_xpaths`].

pub use self::traverse::{traverse, traverse_mut, Descendants};
pub use self::xpath::{
    find, find_elem_by_id, find_elem_by_id_exn, find_exn, find_mut, find_path, update_xpaths,
};

mod traverse;
mod xpath;
