// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for geometry encoding
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during geometry encoding
#[derive(Error, Debug)]
pub enum Error {
    #[error("Index buffer length {len} is not a multiple of 3")]
    IndexCountNotMultipleOfThree { len: usize },

    #[error("Position buffer length {len} is not a multiple of 3")]
    PositionCountNotMultipleOfThree { len: usize },

    #[error("Index {index} at slot {slot} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        slot: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Empty mesh: {0}")]
    EmptyMesh(String),

    #[error("Non-finite coordinate in {0}")]
    NonFiniteCoordinate(String),

    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Invalid extrusion parameters: {0}")]
    InvalidExtrusion(String),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("Record graph error: {0}")]
    Core(#[from] ifc_export_core::Error),
}
