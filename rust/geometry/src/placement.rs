// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement encoding
//!
//! Point → axis placement → local placement. Placements encode translation
//! only: axis and reference direction are always left unset, so every frame
//! is parallel to its parent.

use ifc_export_core::{
    smallvec, Axis2Placement2D, Axis2Placement3D, CartesianPoint, Direction, EntityId,
    EntityWriter, LocalPlacement, RecordSink,
};
use nalgebra::{Point2, Point3, Vector3};

use crate::error::{Error, Result};

fn check_finite(values: &[f64], what: &str) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(Error::NonFiniteCoordinate(what.to_string()))
    }
}

fn check_direction(d: &Vector3<f64>) -> Result<()> {
    check_finite(&[d.x, d.y, d.z], "direction")?;
    if d.norm_squared() == 0.0 {
        return Err(Error::InvalidDirection("zero-length vector".to_string()));
    }
    Ok(())
}

/// Reject a project origin or north vector that [`point`] or [`direction`]
/// would refuse, without writing anything
pub fn check_frame(origin: &Point3<f64>, north: &Vector3<f64>) -> Result<()> {
    check_finite(&[origin.x, origin.y, origin.z], "project origin")?;
    check_direction(north)
}

/// `IfcCartesianPoint` with three coordinates
pub fn point<S: RecordSink>(w: &mut EntityWriter<S>, p: &Point3<f64>) -> Result<EntityId> {
    check_finite(&[p.x, p.y, p.z], "point")?;
    Ok(w.add(CartesianPoint {
        coordinates: smallvec![p.x, p.y, p.z],
    })?)
}

/// `IfcCartesianPoint` with two coordinates
pub fn point_2d<S: RecordSink>(w: &mut EntityWriter<S>, p: &Point2<f64>) -> Result<EntityId> {
    check_finite(&[p.x, p.y], "2D point")?;
    Ok(w.add(CartesianPoint {
        coordinates: smallvec![p.x, p.y],
    })?)
}

/// `IfcDirection`; the vector is written as given, not normalized
pub fn direction<S: RecordSink>(w: &mut EntityWriter<S>, d: &Vector3<f64>) -> Result<EntityId> {
    check_direction(d)?;
    Ok(w.add(Direction {
        ratios: smallvec![d.x, d.y, d.z],
    })?)
}

/// Point + `IfcAxis2Placement3D`
pub fn axis_placement<S: RecordSink>(
    w: &mut EntityWriter<S>,
    origin: &Point3<f64>,
) -> Result<EntityId> {
    let location = point(w, origin)?;
    Ok(w.add(Axis2Placement3D { location })?)
}

/// Point + `IfcAxis2Placement2D`
pub fn axis_placement_2d<S: RecordSink>(
    w: &mut EntityWriter<S>,
    origin: &Point2<f64>,
) -> Result<EntityId> {
    let location = point_2d(w, origin)?;
    Ok(w.add(Axis2Placement2D { location })?)
}

/// Point + axis placement + `IfcLocalPlacement`, optionally relative to `parent`
pub fn local_placement<S: RecordSink>(
    w: &mut EntityWriter<S>,
    origin: &Point3<f64>,
    parent: Option<EntityId>,
) -> Result<EntityId> {
    let relative_placement = axis_placement(w, origin)?;
    Ok(w.add(LocalPlacement {
        placement_rel_to: parent,
        relative_placement,
    })?)
}

/// Nested frames: each origin is relative to the previous one, the first to `parent`.
///
/// Returns the innermost placement, or `parent` when `origins` is empty.
pub fn nested_local_placement<S: RecordSink>(
    w: &mut EntityWriter<S>,
    origins: &[Point3<f64>],
    parent: Option<EntityId>,
) -> Result<Option<EntityId>> {
    let mut current = parent;
    for origin in origins {
        current = Some(local_placement(w, origin, current)?);
    }
    Ok(current)
}
