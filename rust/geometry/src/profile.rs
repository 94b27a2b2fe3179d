// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Circular profile extrusions (round columns, posts, piles)

use ifc_export_core::{
    CircleProfileDef, EntityId, EntityWriter, ExtrudedAreaSolid, ProfileType, RecordSink,
    ShapeRepresentation,
};
use nalgebra::{Point2, Point3, Vector3};

use crate::brep::BODY_IDENTIFIER;
use crate::error::{Error, Result};
use crate::placement;

/// Representation type of extruded solids
pub const SWEPT_SOLID_TYPE: &str = "SweptSolid";

/// Circle of `radius` swept `depth` along `direction` from `position`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CircularExtrusion {
    pub position: Point3<f64>,
    pub direction: Vector3<f64>,
    pub radius: f64,
    pub depth: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub profile_name: Option<String>,
}

impl CircularExtrusion {
    /// Vertical extrusion from `position`
    pub fn vertical(position: Point3<f64>, radius: f64, depth: f64) -> Self {
        Self {
            position,
            direction: Vector3::z(),
            radius,
            depth,
            profile_name: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidExtrusion(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.depth.is_finite() && self.depth > 0.0) {
            return Err(Error::InvalidExtrusion(format!(
                "depth must be positive, got {}",
                self.depth
            )));
        }
        if !self.direction.iter().all(|v| v.is_finite()) || self.direction.norm_squared() == 0.0 {
            return Err(Error::InvalidExtrusion(
                "extrusion direction must be a finite non-zero vector".to_string(),
            ));
        }
        if !self.position.iter().all(|v| v.is_finite()) {
            return Err(Error::NonFiniteCoordinate("extrusion position".to_string()));
        }
        Ok(())
    }
}

/// `IfcCircleProfileDef` (area profile) centred at `center`
pub fn circle_profile<S: RecordSink>(
    w: &mut EntityWriter<S>,
    radius: f64,
    center: &Point2<f64>,
    name: Option<&str>,
) -> Result<EntityId> {
    let position = placement::axis_placement_2d(w, center)?;
    Ok(w.add(CircleProfileDef {
        profile_type: ProfileType::Area,
        name: name.map(str::to_string),
        position,
        radius,
    })?)
}

/// Profile, position, direction and `IfcExtrudedAreaSolid`
pub fn extruded_area_solid<S: RecordSink>(
    w: &mut EntityWriter<S>,
    extrusion: &CircularExtrusion,
) -> Result<EntityId> {
    extrusion.validate()?;
    let swept_area = circle_profile(
        w,
        extrusion.radius,
        &Point2::origin(),
        extrusion.profile_name.as_deref(),
    )?;
    let position = placement::axis_placement(w, &extrusion.position)?;
    let extruded_direction = placement::direction(w, &extrusion.direction)?;
    Ok(w.add(ExtrudedAreaSolid {
        swept_area,
        position,
        extruded_direction,
        depth: extrusion.depth,
    })?)
}

/// Solid plus its `Body`/`SweptSolid` shape representation; returns the representation
pub fn encode_extrusion<S: RecordSink>(
    w: &mut EntityWriter<S>,
    extrusion: &CircularExtrusion,
    context: EntityId,
) -> Result<EntityId> {
    let solid = extruded_area_solid(w, extrusion)?;
    Ok(w.add(ShapeRepresentation {
        context,
        identifier: BODY_IDENTIFIER.to_string(),
        representation_type: SWEPT_SOLID_TYPE.to_string(),
        items: vec![solid],
    })?)
}
