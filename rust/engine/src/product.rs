// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Product encoding: geometry, product definition shape, placement, element

use ifc_export_core::{EntityId, EntityWriter, Product, ProductDefinitionShape, RecordSink};
use ifc_export_geometry::{encode_extrusion, encode_mesh, placement};
use nalgebra::Point3;

use crate::error::Result;
use crate::object::PreparedObject;

/// Records written for one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedProduct {
    pub product: EntityId,
    pub placement: EntityId,
    /// `None` when the object carried no geometry
    pub shape: Option<EntityId>,
    pub representations: Vec<EntityId>,
    pub styled_items: Vec<EntityId>,
}

/// Write the geometry of `object` in `body_context`, then its product
/// definition shape, its placement relative to `parent_placement` and the
/// element itself.
pub fn encode_product<S: RecordSink>(
    w: &mut EntityWriter<S>,
    object: &PreparedObject,
    body_context: EntityId,
    parent_placement: EntityId,
) -> Result<EncodedProduct> {
    let mut representations = Vec::with_capacity(object.meshes.len() + object.extrusions.len());
    let mut styled_items = Vec::new();

    for mesh in &object.meshes {
        let encoded = encode_mesh(w, mesh, body_context)?;
        representations.push(encoded.representation);
        styled_items.extend(encoded.styled_item);
    }
    for extrusion in &object.extrusions {
        representations.push(encode_extrusion(w, extrusion, body_context)?);
    }

    let shape = if representations.is_empty() {
        None
    } else {
        Some(w.add(ProductDefinitionShape {
            name: None,
            description: None,
            representations: representations.clone(),
        })?)
    };

    let origin = Point3::from(object.placement);
    let placement = placement::local_placement(w, &origin, Some(parent_placement))?;

    let global_id = w.global_id();
    let name = object
        .name
        .clone()
        .unwrap_or_else(|| object.element_type.name().to_string());
    let product = w.add(Product {
        element_type: object.element_type,
        global_id,
        name: Some(name),
        object_type: None,
        placement,
        representation: shape,
        tag: Some(object.element_id.to_string()),
    })?;

    Ok(EncodedProduct {
        product,
        placement,
        shape,
        representations,
        styled_items,
    })
}
