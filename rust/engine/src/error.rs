// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::builder::Phase;

/// Result type for export sessions
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an export session
#[derive(Error, Debug)]
pub enum Error {
    #[error("Export object {index} rejected: {source}")]
    InvalidObject {
        index: usize,
        #[source]
        source: ifc_export_geometry::Error,
    },

    #[error("Unknown element {0} in model store")]
    UnknownElement(u32),

    #[error("Session is in phase {actual:?}, expected {expected:?}")]
    PhaseOrder { expected: Phase, actual: Phase },

    #[error("Export cancelled")]
    Cancelled,

    #[error("Session was aborted by an earlier error")]
    Aborted,

    #[error("Geometry error: {0}")]
    Geometry(#[from] ifc_export_geometry::Error),

    #[error("Record graph error: {0}")]
    Core(#[from] ifc_export_core::Error),
}
