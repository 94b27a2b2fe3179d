// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Project and spatial hierarchy
//!
//! One site, one building and one storey per export, sharing one
//! placement. Every product is contained in the storey; storey, building
//! and site are each aggregated into their parent.

use ifc_export_core::{
    CompositionType, Entity, EntityId, EntityWriter, Project, RecordSink, RelAggregates,
    RelContainedInSpatialStructure, SpatialStructure,
};

use crate::config::ExportConfig;
use crate::context::RepresentationContexts;
use crate::error::Result;

/// Records of the spatial structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpatialHierarchy {
    pub site: EntityId,
    pub building: EntityId,
    pub storey: EntityId,
    /// Absent when there were no products to contain
    pub containment: Option<EntityId>,
    /// storey → building, building → site, site → project
    pub aggregations: [EntityId; 3],
}

/// `IfcProject` referencing the model context and `units`
pub fn build_project<S: RecordSink>(
    w: &mut EntityWriter<S>,
    contexts: &RepresentationContexts,
    units: EntityId,
    config: &ExportConfig,
) -> Result<EntityId> {
    let global_id = w.global_id();
    Ok(w.add(Project {
        global_id,
        name: Some(config.project_name.clone()),
        description: config.project_description.clone(),
        representation_contexts: vec![contexts.context],
        units_in_context: units,
    })?)
}

fn spatial_structure<S: RecordSink>(
    w: &mut EntityWriter<S>,
    name: &str,
    placement: EntityId,
) -> SpatialStructure {
    SpatialStructure {
        global_id: w.global_id(),
        name: Some(name.to_string()),
        description: None,
        object_type: None,
        placement,
        long_name: None,
        composition: CompositionType::Element,
    }
}

fn aggregate<S: RecordSink>(
    w: &mut EntityWriter<S>,
    relating_object: EntityId,
    related_object: EntityId,
) -> Result<EntityId> {
    let global_id = w.global_id();
    Ok(w.add(RelAggregates {
        global_id,
        name: None,
        description: None,
        relating_object,
        related_objects: vec![related_object],
    })?)
}

/// Site, building and storey at `placement`, the storey containment of
/// `products` and the aggregation chain up to `project`
pub fn build_hierarchy<S: RecordSink>(
    w: &mut EntityWriter<S>,
    project: EntityId,
    placement: EntityId,
    products: &[EntityId],
    config: &ExportConfig,
) -> Result<SpatialHierarchy> {
    let site = Entity::Site(spatial_structure(w, &config.site_name, placement));
    let site = w.add(site)?;
    let building = Entity::Building(spatial_structure(w, &config.building_name, placement));
    let building = w.add(building)?;
    let storey = Entity::BuildingStorey(spatial_structure(w, &config.storey_name, placement));
    let storey = w.add(storey)?;

    let containment = if products.is_empty() {
        None
    } else {
        let global_id = w.global_id();
        Some(w.add(RelContainedInSpatialStructure {
            global_id,
            name: None,
            description: None,
            related_elements: products.to_vec(),
            relating_structure: storey,
        })?)
    };

    let aggregations = [
        aggregate(w, building, storey)?,
        aggregate(w, site, building)?,
        aggregate(w, project, site)?,
    ];

    Ok(SpatialHierarchy {
        site,
        building,
        storey,
        containment,
        aggregations,
    })
}
