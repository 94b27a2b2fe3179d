// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Export Geometry
//!
//! Encodes triangle meshes, materials, placements and circular
//! extrusions into record subgraphs through an
//! [`EntityWriter`](ifc_export_core::EntityWriter).

pub mod brep;
pub mod error;
pub mod mesh;
pub mod placement;
pub mod profile;
pub mod style;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use brep::{encode_mesh, faceted_brep, EncodedMesh, PreparedMesh};
pub use error::{Error, Result};
pub use mesh::{Color, Material, Triangle, TriangleMesh};
pub use placement::{axis_placement, direction, local_placement, nested_local_placement, point};
pub use profile::{encode_extrusion, CircularExtrusion};
pub use style::style_item;
