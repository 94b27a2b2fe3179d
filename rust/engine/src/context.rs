// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Representation contexts and unit assignment
//!
//! Written once per session, before any geometry.

use ifc_export_core::{
    EntityId, EntityWriter, GeometricRepresentationContext, GeometricRepresentationSubContext,
    RecordSink, SiUnit, SiUnitName, TargetView, UnitAssignment, UnitType,
};
use ifc_export_geometry::placement;
use nalgebra::{Point3, Vector3};

use crate::error::Result;

/// Context type of the model context and its sub-contexts
pub const MODEL_CONTEXT_TYPE: &str = "Model";

/// Coordinate space dimension of the model context
pub const MODEL_DIMENSION: i64 = 3;

/// Sub-contexts, in the order they are written
pub const SUB_CONTEXTS: [(&str, TargetView); 4] = [
    ("Axis", TargetView::GraphView),
    ("Body", TargetView::ModelView),
    ("Box", TargetView::ModelView),
    ("Footprint", TargetView::ModelView),
];

/// Unit set assigned to every exported project, in order
pub const UNIT_SET: [(UnitType, SiUnitName); 8] = [
    (UnitType::Length, SiUnitName::Metre),
    (UnitType::Area, SiUnitName::SquareMetre),
    (UnitType::Volume, SiUnitName::CubicMetre),
    (UnitType::Mass, SiUnitName::Gram),
    (UnitType::SolidAngle, SiUnitName::Steradian),
    (UnitType::Time, SiUnitName::Second),
    (UnitType::ThermodynamicTemperature, SiUnitName::DegreeCelsius),
    (UnitType::LuminousIntensity, SiUnitName::Lumen),
];

/// Model context and its named sub-contexts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepresentationContexts {
    pub context: EntityId,
    pub axis: EntityId,
    pub body: EntityId,
    pub bounding_box: EntityId,
    pub footprint: EntityId,
}

/// World coordinate system at `origin`, true north, the model context and four sub-contexts
pub fn build_context<S: RecordSink>(
    w: &mut EntityWriter<S>,
    origin: &Point3<f64>,
    north: &Vector3<f64>,
    precision: f64,
) -> Result<RepresentationContexts> {
    let world_coordinate_system = placement::axis_placement(w, origin)?;
    let true_north = placement::direction(w, north)?;
    let context = w.add(GeometricRepresentationContext {
        context_identifier: None,
        context_type: MODEL_CONTEXT_TYPE.to_string(),
        dimension: MODEL_DIMENSION,
        precision,
        world_coordinate_system,
        true_north: Some(true_north),
    })?;

    let mut subs = [context; 4];
    for (slot, (identifier, target_view)) in subs.iter_mut().zip(SUB_CONTEXTS) {
        *slot = w.add(GeometricRepresentationSubContext {
            context_identifier: identifier.to_string(),
            context_type: MODEL_CONTEXT_TYPE.to_string(),
            parent: context,
            target_view,
        })?;
    }

    Ok(RepresentationContexts {
        context,
        axis: subs[0],
        body: subs[1],
        bounding_box: subs[2],
        footprint: subs[3],
    })
}

/// The eight SI units of [`UNIT_SET`] and the assignment listing them
pub fn build_units<S: RecordSink>(w: &mut EntityWriter<S>) -> Result<EntityId> {
    let mut units = Vec::with_capacity(UNIT_SET.len());
    for (unit_type, name) in UNIT_SET {
        units.push(w.add(SiUnit { unit_type, name })?);
    }
    Ok(w.add(UnitAssignment { units })?)
}
