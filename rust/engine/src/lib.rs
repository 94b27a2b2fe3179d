// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC Export Engine
//!
//! Turns export objects (triangle meshes, materials, element type and
//! placement) into a complete IFC4 model: representation contexts and
//! units, one product per object, and the project → site → building →
//! storey hierarchy.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_export_engine::{export_model, ExportConfig, ExportObject};
//! use ifc_export_core::ElementType;
//! use ifc_export_geometry::TriangleMesh;
//! use nalgebra::Vector3;
//!
//! let mesh = TriangleMesh::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0], vec![0, 1, 2]);
//! let wall = ExportObject::new(ElementType::Wall, 1, Vector3::new(5.0, 0.0, 0.0), vec![mesh]);
//! let bytes = export_model(&Vector3::zeros(), &Vector3::y(), &[wall], &ExportConfig::default())?;
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod export;
pub mod object;
pub mod product;
pub mod spatial;
pub mod store;

pub use builder::{CancelFlag, ExportSummary, FinishedModel, ModelBuilder, Phase, ProjectScaffold};
pub use config::ExportConfig;
pub use context::{build_context, build_units, RepresentationContexts, UNIT_SET};
pub use error::{Error, Result};
pub use export::{export_model, prepare_objects, Exporter};
pub use object::{ExportObject, PreparedObject};
pub use product::{encode_product, EncodedProduct};
pub use spatial::{build_hierarchy, build_project, SpatialHierarchy};
pub use store::{collect_export_objects, MemoryStore, ModelStore, StoredElement};
