// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export objects: the input unit of an export session

use ifc_export_core::ElementType;
use ifc_export_geometry::{CircularExtrusion, Material, PreparedMesh, TriangleMesh};
use nalgebra::Vector3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One building element to export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportObject {
    /// Triangle meshes, one faceted brep each
    pub meshes: Vec<TriangleMesh>,
    /// Material of the mesh at the same index; meshes past the end are unstyled
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Circular extrusions, one swept solid each
    #[serde(default)]
    pub extrusions: Vec<CircularExtrusion>,
    pub element_type: ElementType,
    /// Identifier of the element in the source model, written as the product tag
    pub element_id: u32,
    /// Offset of the element placement from the project placement
    pub placement: Vector3<f64>,
    /// Product name; the element type name when unset
    #[serde(default)]
    pub name: Option<String>,
}

impl ExportObject {
    /// Object with meshes only
    pub fn new(
        element_type: ElementType,
        element_id: u32,
        placement: Vector3<f64>,
        meshes: Vec<TriangleMesh>,
    ) -> Self {
        Self {
            meshes,
            materials: Vec::new(),
            extrusions: Vec::new(),
            element_type,
            element_id,
            placement,
            name: None,
        }
    }

    pub fn with_materials(mut self, materials: Vec<Material>) -> Self {
        self.materials = materials;
        self
    }

    pub fn with_extrusion(mut self, extrusion: CircularExtrusion) -> Self {
        self.extrusions.push(extrusion);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(TriangleMesh::triangle_count).sum()
    }

    /// Validate everything and resolve triangles; no record is written
    pub fn prepare(&self) -> ifc_export_geometry::Result<PreparedObject> {
        if !self.placement.iter().all(|v| v.is_finite()) {
            return Err(ifc_export_geometry::Error::NonFiniteCoordinate(
                "object placement".to_string(),
            ));
        }
        let meshes = self
            .meshes
            .par_iter()
            .enumerate()
            .map(|(i, mesh)| PreparedMesh::prepare(mesh, self.materials.get(i)))
            .collect::<ifc_export_geometry::Result<Vec<_>>>()?;
        for extrusion in &self.extrusions {
            extrusion.validate()?;
        }
        Ok(PreparedObject {
            meshes,
            extrusions: self.extrusions.clone(),
            element_type: self.element_type,
            element_id: self.element_id,
            placement: self.placement,
            name: self.name.clone(),
        })
    }
}

/// Export object whose inputs passed validation
#[derive(Debug, Clone)]
pub struct PreparedObject {
    pub meshes: Vec<PreparedMesh>,
    pub extrusions: Vec<CircularExtrusion>,
    pub element_type: ElementType,
    pub element_id: u32,
    pub placement: Vector3<f64>,
    pub name: Option<String>,
}

impl PreparedObject {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangles().len()).sum()
    }
}
