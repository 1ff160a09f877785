// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::diff::DiffError;
use crate::xml;

/// `Document` errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The text doesn't contain any element.
    #[error("the document does not have any elements")]
    EmptyDocument,

    /// A malformed XML.
    #[error(transparent)]
    Xml(#[from] xml::Error),

    /// The text patch engine was fed with an unexpected tree shape.
    #[error(transparent)]
    Diff(#[from] DiffError),
}

/// Strict lookup errors.
#[derive(Clone, PartialEq, Debug, Error)]
pub enum LookupError {
    /// An address doesn't resolve to any node.
    #[error("no node at address '{0}'")]
    AddressNotFound(String),

    /// No element has the requested `id`.
    #[error("no element with id '{0}'")]
    IdNotFound(String),
}
