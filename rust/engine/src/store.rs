// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only access to an already loaded model

use ifc_export_core::ElementType;
use ifc_export_geometry::{Material, TriangleMesh};
use nalgebra::Vector3;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::object::ExportObject;

/// Source model the export objects are read from. Never mutated by the exporter.
pub trait ModelStore {
    /// Meshes of an element with their optional materials
    fn meshes(&self, element_id: u32) -> Vec<(TriangleMesh, Option<Material>)>;
    /// Placement offset of an element
    fn placement(&self, element_id: u32) -> Option<Vector3<f64>>;
    /// Element type of an element
    fn element_type(&self, element_id: u32) -> Option<ElementType>;
}

impl ExportObject {
    /// Build the export object for `element_id` from `store`
    pub fn from_store<M: ModelStore + ?Sized>(store: &M, element_id: u32) -> Result<Self> {
        let element_type = store
            .element_type(element_id)
            .ok_or(Error::UnknownElement(element_id))?;
        let placement = store
            .placement(element_id)
            .ok_or(Error::UnknownElement(element_id))?;
        let (meshes, materials) = store
            .meshes(element_id)
            .into_iter()
            .map(|(mesh, material)| (mesh, material.unwrap_or_default()))
            .unzip();
        Ok(Self {
            meshes,
            materials,
            extrusions: Vec::new(),
            element_type,
            element_id,
            placement,
            name: None,
        })
    }
}

/// Export objects for `element_ids`, in the given order
pub fn collect_export_objects<M: ModelStore + ?Sized>(
    store: &M,
    element_ids: &[u32],
) -> Result<Vec<ExportObject>> {
    element_ids
        .iter()
        .map(|&id| ExportObject::from_store(store, id))
        .collect()
}

/// Element as held by [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct StoredElement {
    pub element_type: ElementType,
    pub placement: Vector3<f64>,
    pub meshes: Vec<(TriangleMesh, Option<Material>)>,
}

/// Hash-map backed store for models already decoded in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    elements: FxHashMap<u32, StoredElement>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, element_id: u32, element: StoredElement) {
        self.elements.insert(element_id, element);
    }

    /// Stored element ids in ascending order
    pub fn element_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.elements.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl ModelStore for MemoryStore {
    fn meshes(&self, element_id: u32) -> Vec<(TriangleMesh, Option<Material>)> {
        self.elements
            .get(&element_id)
            .map(|e| e.meshes.clone())
            .unwrap_or_default()
    }

    fn placement(&self, element_id: u32) -> Option<Vector3<f64>> {
        self.elements.get(&element_id).map(|e| e.placement)
    }

    fn element_type(&self, element_id: u32) -> Option<ElementType> {
        self.elements.get(&element_id).map(|e| e.element_type)
    }
}
