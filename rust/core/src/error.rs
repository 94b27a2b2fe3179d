// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::id::EntityId;

/// Result type for record graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or writing a record graph
#[derive(Error, Debug)]
pub enum Error {
    #[error("Identifier space exhausted after #{last}")]
    AllocatorExhausted { last: u32 },

    #[error("Invalid identifier range: start {start}, end {end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("Record {record} references {target}, which has not been written")]
    ForwardReference { record: EntityId, target: EntityId },

    #[error("Record {0} was already written")]
    DuplicateId(EntityId),

    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),
}
