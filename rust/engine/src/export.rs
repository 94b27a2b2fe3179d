// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export entry points
//!
//! All objects are validated and triangulated in parallel before the first
//! identifier is drawn, so a structural-input error never leaves a
//! partially written graph behind.

use std::io::Write;

use ifc_export_core::{StepModel, StepWriter};
use ifc_export_geometry::placement::check_frame;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use crate::builder::{CancelFlag, ExportSummary, FinishedModel, ModelBuilder};
use crate::config::ExportConfig;
use crate::error::{Error, Result};
use crate::object::{ExportObject, PreparedObject};

/// Validate every object; the error names the first rejected index
pub fn prepare_objects(objects: &[ExportObject]) -> Result<Vec<PreparedObject>> {
    let prepared: Vec<_> = objects.par_iter().map(ExportObject::prepare).collect();
    prepared
        .into_iter()
        .enumerate()
        .map(|(index, result)| result.map_err(|source| Error::InvalidObject { index, source }))
        .collect()
}

/// Configured exporter
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
    cancel: CancelFlag,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::default(),
        }
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn run<S: ifc_export_core::RecordSink>(
        &self,
        sink: S,
        origin: &Vector3<f64>,
        north: &Vector3<f64>,
        objects: &[PreparedObject],
    ) -> Result<FinishedModel<S>> {
        let mut builder =
            ModelBuilder::new(sink, self.config.clone())?.with_cancel_flag(self.cancel.clone());
        builder.initialize(&Point3::from(*origin), north)?;
        for object in objects {
            builder.encode_prepared(object)?;
        }
        builder.finalize()
    }

    /// Complete file content, or an error and no bytes
    pub fn export(
        &self,
        project_origin: &Vector3<f64>,
        north: &Vector3<f64>,
        objects: &[ExportObject],
    ) -> Result<(Vec<u8>, ExportSummary)> {
        check_frame(&Point3::from(*project_origin), north)?;
        let prepared = prepare_objects(objects)?;
        let finished = self.run(StepModel::new(), project_origin, north, &prepared)?;
        let bytes = finished.sink.to_bytes(&self.config.header());
        Ok((bytes, finished.summary))
    }

    /// Stream the file to `out`.
    ///
    /// The project frame and every object are validated before the header
    /// is written, so invalid input leaves `out` untouched. A later sink or
    /// allocator failure leaves `out` holding a truncated file.
    pub fn export_to_writer<W: Write>(
        &self,
        out: W,
        project_origin: &Vector3<f64>,
        north: &Vector3<f64>,
        objects: &[ExportObject],
    ) -> Result<(W, ExportSummary)> {
        check_frame(&Point3::from(*project_origin), north)?;
        let prepared = prepare_objects(objects)?;
        let sink = StepWriter::new(out, &self.config.header())?;
        let finished = self.run(sink, project_origin, north, &prepared)?;
        let out = finished.sink.finish()?;
        Ok((out, finished.summary))
    }
}

/// Export `objects` with `config`; returns the complete file content
pub fn export_model(
    project_origin: &Vector3<f64>,
    north: &Vector3<f64>,
    objects: &[ExportObject],
    config: &ExportConfig,
) -> Result<Vec<u8>> {
    Exporter::new(config.clone())
        .export(project_origin, north, objects)
        .map(|(bytes, _)| bytes)
}
