// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity writer: the single point where identifiers are drawn and records appended.

use crate::entity::Entity;
use crate::error::Result;
use crate::guid::{GlobalId, GlobalIdSource, RandomGlobalIds};
use crate::id::{EntityId, IdAllocator};
use crate::record::Record;
use crate::sink::RecordSink;

/// Couples one session's allocator, tag source and sink.
///
/// [`add`](Self::add) allocates exactly one identifier and writes exactly
/// one record. Callers build children first, so every reference a record
/// carries points at a lower, already-written identifier.
pub struct EntityWriter<S: RecordSink> {
    ids: IdAllocator,
    global_ids: Box<dyn GlobalIdSource + Send>,
    sink: S,
    written: usize,
}

impl<S: RecordSink> EntityWriter<S> {
    /// Writer with a fresh allocator starting at #1 and random tags
    pub fn new(sink: S) -> Self {
        Self::with_allocator(sink, IdAllocator::new())
    }

    pub fn with_allocator(sink: S, ids: IdAllocator) -> Self {
        Self {
            ids,
            global_ids: Box::new(RandomGlobalIds),
            sink,
            written: 0,
        }
    }

    /// Replace the tag source
    pub fn with_global_ids(mut self, source: impl GlobalIdSource + Send + 'static) -> Self {
        self.global_ids = Box::new(source);
        self
    }

    /// Allocate an identifier for `entity` and write it
    pub fn add(&mut self, entity: impl Into<Entity>) -> Result<EntityId> {
        let id = self.ids.next_id()?;
        self.sink.write(Record::new(id, entity.into()))?;
        self.written += 1;
        Ok(id)
    }

    /// Fresh globally unique tag
    pub fn global_id(&mut self) -> GlobalId {
        self.global_ids.next_global_id()
    }

    /// Records written through this writer
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Axis2Placement3D, CartesianPoint};
    use crate::error::Error;
    use crate::guid::SequentialGlobalIds;
    use crate::sink::StepModel;
    use smallvec::smallvec;

    #[test]
    fn test_ids_follow_write_order() {
        let mut writer = EntityWriter::new(StepModel::new());
        let point = writer
            .add(CartesianPoint {
                coordinates: smallvec![1.0, 2.0, 3.0],
            })
            .unwrap();
        let axis = writer.add(Axis2Placement3D { location: point }).unwrap();
        assert!(point < axis);
        assert_eq!(writer.written(), 2);
        let model = writer.into_sink();
        assert_eq!(model.records()[0].id(), point);
        assert_eq!(model.records()[1].id(), axis);
    }

    #[test]
    fn test_exhausted_allocator_writes_nothing() {
        let ids = IdAllocator::with_range(1, 1).unwrap();
        let mut writer = EntityWriter::with_allocator(StepModel::new(), ids);
        let point = CartesianPoint {
            coordinates: smallvec![0.0, 0.0, 0.0],
        };
        writer.add(point.clone()).unwrap();
        assert!(matches!(
            writer.add(point),
            Err(Error::AllocatorExhausted { .. })
        ));
        assert_eq!(writer.sink().len(), 1);
    }

    #[test]
    fn test_custom_global_id_source() {
        let mut writer =
            EntityWriter::new(StepModel::new()).with_global_ids(SequentialGlobalIds::new());
        assert_eq!(writer.global_id().as_str(), "0000000000000000000001");
        assert_eq!(writer.global_id().as_str(), "0000000000000000000002");
    }
}
