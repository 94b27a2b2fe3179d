// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record sinks
//!
//! A sink receives completed records in creation order. [`StepModel`]
//! keeps them in memory and serializes the whole file at the end;
//! [`StepWriter`] streams each record straight to an `io::Write`.
//!
//! Both sinks check that every reference names a record already written,
//! so a graph that reaches a sink is always topologically ordered.

use rustc_hash::FxHashSet;
use std::io::Write;

use crate::error::{Error, Result};
use crate::id::EntityId;
use crate::record::Record;
use crate::step::FileHeader;

/// Append-only destination for records
pub trait RecordSink {
    /// Accept one record; must preserve call order and fail loudly
    fn write(&mut self, record: Record) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn write(&mut self, record: Record) -> Result<()> {
        (**self).write(record)
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write(&mut self, record: Record) -> Result<()> {
        (**self).write(record)
    }
}

/// Tracks written identifiers and rejects forward references and duplicates
#[derive(Debug, Default)]
struct WrittenSet {
    ids: FxHashSet<EntityId>,
}

impl WrittenSet {
    fn admit(&mut self, record: &Record) -> Result<()> {
        if self.ids.contains(&record.id()) {
            return Err(Error::DuplicateId(record.id()));
        }
        if let Some(target) = record
            .references()
            .into_iter()
            .find(|target| !self.ids.contains(target))
        {
            return Err(Error::ForwardReference {
                record: record.id(),
                target,
            });
        }
        self.ids.insert(record.id());
        Ok(())
    }
}

/// In-memory model: records in sink order, serialized on demand
#[derive(Debug, Default)]
pub struct StepModel {
    records: Vec<Record>,
    written: WrittenSet,
}

impl StepModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records of one STEP type
    pub fn count_of(&self, type_name: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.type_name() == type_name)
            .count()
    }

    /// Complete physical file text
    pub fn to_step_string(&self, header: &FileHeader) -> String {
        let mut out = String::with_capacity(256 + self.records.len() * 64);
        header.write_preamble(&mut out);
        for record in &self.records {
            record.write_step(&mut out);
            out.push('\n');
        }
        FileHeader::write_trailer(&mut out);
        out
    }

    /// Complete physical file bytes
    pub fn to_bytes(&self, header: &FileHeader) -> Vec<u8> {
        self.to_step_string(header).into_bytes()
    }
}

impl RecordSink for StepModel {
    fn write(&mut self, record: Record) -> Result<()> {
        self.written.admit(&record)?;
        self.records.push(record);
        Ok(())
    }
}

/// Streaming sink: header on creation, one line per record, trailer on [`finish`](Self::finish)
pub struct StepWriter<W: Write> {
    out: W,
    line: String,
    written: WrittenSet,
    count: usize,
}

impl<W: Write> StepWriter<W> {
    pub fn new(mut out: W, header: &FileHeader) -> Result<Self> {
        let mut preamble = String::new();
        header.write_preamble(&mut preamble);
        out.write_all(preamble.as_bytes())?;
        Ok(Self {
            out,
            line: String::with_capacity(128),
            written: WrittenSet::default(),
            count: 0,
        })
    }

    /// Records written so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Write the trailer, flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        let mut trailer = String::new();
        FileHeader::write_trailer(&mut trailer);
        self.out.write_all(trailer.as_bytes())?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RecordSink for StepWriter<W> {
    fn write(&mut self, record: Record) -> Result<()> {
        self.written.admit(&record)?;
        self.line.clear();
        record.write_step(&mut self.line);
        self.line.push('\n');
        self.out.write_all(self.line.as_bytes())?;
        self.count += 1;
        Ok(())
    }
}
