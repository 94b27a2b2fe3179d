// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Export Core
//!
//! Write side of a STEP/IFC physical file: a typed, append-only record
//! graph serialized one statement per line.
//!
//! ## Overview
//!
//! - **Attribute codec**: typed values (`Real`, `Text`, `Enumerated`,
//!   `Reference`, `Omitted`, ...) and their STEP text encoding
//! - **Entity kinds**: one struct per written IFC4 entity, closed under [`Entity`]
//! - **Identifier allocator**: per-session monotonic `#id` counter
//! - **Record sinks**: in-memory [`StepModel`] and streaming [`StepWriter`],
//!   both rejecting forward references
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_export_core::{CartesianPoint, EntityWriter, FileHeader, StepModel};
//!
//! let mut writer = EntityWriter::new(StepModel::new());
//! let point = writer.add(CartesianPoint { coordinates: smallvec![0.0, 0.0, 0.0] })?;
//! let bytes = writer.into_sink().to_bytes(&FileHeader::new("export.ifc"));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for [`ElementType`]

pub mod attribute;
pub mod entity;
pub mod error;
pub mod guid;
pub mod id;
pub mod record;
pub mod sink;
pub mod step;
pub mod writer;

pub use attribute::AttributeValue;
pub use entity::{
    Axis2Placement2D, Axis2Placement3D, CartesianPoint, CircleProfileDef, ClosedShell, ColourRgb,
    CompositionType, Coordinates, Direction, ElementType, Entity, ExtrudedAreaSolid, Face,
    FaceOuterBound, FacetedBrep, GeometricRepresentationContext,
    GeometricRepresentationSubContext, LocalPlacement, PolyLoop, PresentationStyleAssignment,
    Product, ProductDefinitionShape, ProfileType, Project, RelAggregates,
    RelContainedInSpatialStructure, ShapeRepresentation, SiUnit, SiUnitName, SpatialStructure,
    StyledItem, SurfaceSide, SurfaceStyle, SurfaceStyleShading, TargetView, UnitAssignment,
    UnitType, UnknownElementType,
};
pub use error::{Error, Result};
pub use guid::{GlobalId, GlobalIdSource, RandomGlobalIds, SequentialGlobalIds};
pub use id::{EntityId, IdAllocator};
pub use record::Record;
pub use sink::{RecordSink, StepModel, StepWriter};
pub use step::FileHeader;
pub use writer::EntityWriter;

// Re-export for building coordinate tuples
pub use smallvec::{smallvec, SmallVec};
