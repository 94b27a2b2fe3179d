// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model Builder: one export session
//!
//! A session moves through [`Phase::Initialize`], [`Phase::EncodeElements`]
//! and [`Phase::Finalize`] exactly once, in that order. Any error moves it
//! to [`Phase::Aborted`], after which every call fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ifc_export_core::{EntityId, EntityWriter, IdAllocator, RecordSink, SequentialGlobalIds};
use ifc_export_geometry::placement;
use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::context::{build_context, build_units, RepresentationContexts};
use crate::error::{Error, Result};
use crate::object::{ExportObject, PreparedObject};
use crate::product::encode_product;
use crate::spatial::{build_hierarchy, build_project, SpatialHierarchy};

/// Session phase; each is a precondition for the next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialize,
    EncodeElements,
    Finalize,
    Aborted,
}

/// Shared cancellation flag, checked at phase boundaries and between objects
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Records written by [`ModelBuilder::initialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectScaffold {
    pub contexts: RepresentationContexts,
    pub units: EntityId,
    pub project: EntityId,
    /// Shared by site, building and storey; parent of every product placement
    pub placement: EntityId,
}

/// Counts for one finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub records: usize,
    pub products: usize,
    pub triangles: usize,
}

/// Result of [`ModelBuilder::finalize`]
#[derive(Debug)]
pub struct FinishedModel<S> {
    pub sink: S,
    pub scaffold: ProjectScaffold,
    pub hierarchy: SpatialHierarchy,
    pub summary: ExportSummary,
}

/// Drives the encoders in order and owns the session's allocator and sink
pub struct ModelBuilder<S: RecordSink> {
    writer: EntityWriter<S>,
    config: ExportConfig,
    phase: Phase,
    cancel: CancelFlag,
    scaffold: Option<ProjectScaffold>,
    products: Vec<EntityId>,
    triangles: usize,
}

impl<S: RecordSink> ModelBuilder<S> {
    /// Session whose identifiers start at `config.id_seed`
    pub fn new(sink: S, config: ExportConfig) -> Result<Self> {
        let ids = IdAllocator::with_seed(config.id_seed)?;
        Ok(Self::with_allocator(sink, config, ids))
    }

    /// Session drawing identifiers from `ids`, e.g. a partitioned range
    pub fn with_allocator(sink: S, config: ExportConfig, ids: IdAllocator) -> Self {
        let mut writer = EntityWriter::with_allocator(sink, ids);
        if config.deterministic_ids {
            writer = writer.with_global_ids(SequentialGlobalIds::new());
        }
        Self {
            writer,
            config,
            phase: Phase::Initialize,
            cancel: CancelFlag::default(),
            scaffold: None,
            products: Vec::new(),
            triangles: 0,
        }
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Records written so far
    pub fn records_written(&self) -> usize {
        self.writer.written()
    }

    pub fn products(&self) -> &[EntityId] {
        &self.products
    }

    fn enter(&self, expected: Phase) -> Result<()> {
        if self.phase == Phase::Aborted {
            return Err(Error::Aborted);
        }
        if self.phase != expected {
            return Err(Error::PhaseOrder {
                expected,
                actual: self.phase,
            });
        }
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    /// Run `step`, aborting the session if it fails
    fn guarded<T>(&mut self, step: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let result = step(self);
        if let Err(err) = &result {
            if self.phase != Phase::Aborted {
                tracing::warn!(phase = ?self.phase, error = %err, "Export session aborted");
            }
            self.phase = Phase::Aborted;
        }
        result
    }

    /// Contexts, units, project and the hierarchy placement at `origin`
    pub fn initialize(
        &mut self,
        origin: &Point3<f64>,
        north: &Vector3<f64>,
    ) -> Result<ProjectScaffold> {
        self.guarded(|this| {
            this.enter(Phase::Initialize)?;
            let w = &mut this.writer;
            let contexts = build_context(w, origin, north, this.config.precision)?;
            let units = build_units(w)?;
            let project = build_project(w, &contexts, units, &this.config)?;
            let placement = placement::local_placement(w, origin, None)?;

            let scaffold = ProjectScaffold {
                contexts,
                units,
                project,
                placement,
            };
            this.scaffold = Some(scaffold);
            this.phase = Phase::EncodeElements;
            info!(
                records = this.writer.written(),
                project = %project,
                "Initialized export session"
            );
            Ok(scaffold)
        })
    }

    /// Validate and encode one object; returns its product record
    pub fn encode_element(&mut self, object: &ExportObject) -> Result<EntityId> {
        let index = self.products.len();
        let prepared = self.guarded(|this| {
            this.enter(Phase::EncodeElements)?;
            object
                .prepare()
                .map_err(|source| Error::InvalidObject { index, source })
        })?;
        self.encode_prepared(&prepared)
    }

    /// Encode one already validated object; returns its product record
    pub fn encode_prepared(&mut self, object: &PreparedObject) -> Result<EntityId> {
        self.guarded(|this| {
            this.enter(Phase::EncodeElements)?;
            let scaffold = this.scaffold.ok_or(Error::PhaseOrder {
                expected: Phase::EncodeElements,
                actual: Phase::Initialize,
            })?;
            let encoded = encode_product(
                &mut this.writer,
                object,
                scaffold.contexts.body,
                scaffold.placement,
            )?;
            this.products.push(encoded.product);
            this.triangles += object.triangle_count();
            debug!(
                element_id = object.element_id,
                element_type = object.element_type.name(),
                product = %encoded.product,
                representations = encoded.representations.len(),
                "Encoded element"
            );
            Ok(encoded.product)
        })
    }

    /// Build the spatial hierarchy and hand back the sink
    pub fn finalize(mut self) -> Result<FinishedModel<S>> {
        let (scaffold, hierarchy) = self.guarded(|this| {
            this.enter(Phase::EncodeElements)?;
            this.phase = Phase::Finalize;
            let scaffold = this.scaffold.ok_or(Error::PhaseOrder {
                expected: Phase::EncodeElements,
                actual: Phase::Initialize,
            })?;
            let hierarchy = build_hierarchy(
                &mut this.writer,
                scaffold.project,
                scaffold.placement,
                &this.products,
                &this.config,
            )?;
            Ok((scaffold, hierarchy))
        })?;

        let summary = ExportSummary {
            records: self.writer.written(),
            products: self.products.len(),
            triangles: self.triangles,
        };
        info!(
            records = summary.records,
            objects = summary.products,
            triangles = summary.triangles,
            "Finalized export session"
        );
        Ok(FinishedModel {
            sink: self.writer.into_sink(),
            scaffold,
            hierarchy,
            summary,
        })
    }
}
