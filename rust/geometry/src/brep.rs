// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Faceted B-rep encoding
//!
//! Per triangle: three points, a poly loop, a face outer bound and a face.
//! Per mesh: a closed shell over all faces, a faceted brep around it and a
//! `Body`/`Brep` shape representation, plus the optional style chain.
//!
//! Vertices are not deduplicated; every triangle writes its own points.

use ifc_export_core::{
    ClosedShell, EntityId, EntityWriter, Face, FaceOuterBound, FacetedBrep, PolyLoop,
    RecordSink, ShapeRepresentation,
};

use crate::error::Result;
use crate::mesh::{Material, Triangle, TriangleMesh};
use crate::placement;
use crate::style;

/// Representation identifier of solid bodies
pub const BODY_IDENTIFIER: &str = "Body";
/// Representation type of faceted breps
pub const BREP_TYPE: &str = "Brep";

/// Mesh whose triangles and material were checked before any record is written
#[derive(Debug, Clone)]
pub struct PreparedMesh {
    triangles: Vec<Triangle>,
    material: Option<Material>,
}

impl PreparedMesh {
    /// Validate `mesh` and `material` and resolve the triangles
    pub fn prepare(mesh: &TriangleMesh, material: Option<&Material>) -> Result<Self> {
        let triangles = mesh.triangles()?;
        if let Some(material) = material {
            material.validate()?;
        }
        Ok(Self {
            triangles,
            material: material.copied(),
        })
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }
}

/// Records written for one mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedMesh {
    pub brep: EntityId,
    pub representation: EntityId,
    pub styled_item: Option<EntityId>,
}

/// Three points and the `IfcPolyLoop` over them
pub fn poly_loop<S: RecordSink>(w: &mut EntityWriter<S>, triangle: &Triangle) -> Result<EntityId> {
    let mut polygon = Vec::with_capacity(3);
    for corner in triangle {
        polygon.push(placement::point(w, corner)?);
    }
    Ok(w.add(PolyLoop { polygon })?)
}

/// Loop, outer bound and `IfcFace` for one triangle
pub fn face<S: RecordSink>(w: &mut EntityWriter<S>, triangle: &Triangle) -> Result<EntityId> {
    let bound = poly_loop(w, triangle)?;
    let outer = w.add(FaceOuterBound {
        bound,
        orientation: true,
    })?;
    Ok(w.add(Face {
        bounds: vec![outer],
    })?)
}

/// One face per triangle, then the closed shell and `IfcFacetedBrep`
pub fn faceted_brep<S: RecordSink>(
    w: &mut EntityWriter<S>,
    triangles: &[Triangle],
) -> Result<EntityId> {
    let mut faces = Vec::with_capacity(triangles.len());
    for triangle in triangles {
        faces.push(face(w, triangle)?);
    }
    let outer = w.add(ClosedShell { faces })?;
    Ok(w.add(FacetedBrep { outer })?)
}

/// Brep, shape representation in `context`, and style when the material has a color
pub fn encode_mesh<S: RecordSink>(
    w: &mut EntityWriter<S>,
    mesh: &PreparedMesh,
    context: EntityId,
) -> Result<EncodedMesh> {
    let brep = faceted_brep(w, &mesh.triangles)?;
    let representation = w.add(ShapeRepresentation {
        context,
        identifier: BODY_IDENTIFIER.to_string(),
        representation_type: BREP_TYPE.to_string(),
        items: vec![brep],
    })?;
    let styled_item = match &mesh.material {
        Some(material) => style::style_item(w, brep, material)?,
        None => None,
    };

    tracing::debug!(
        triangles = mesh.triangles.len(),
        brep = %brep,
        styled = styled_item.is_some(),
        "Encoded mesh"
    );

    Ok(EncodedMesh {
        brep,
        representation,
        styled_item,
    })
}
