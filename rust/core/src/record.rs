// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identified, immutable records.

use crate::attribute::{write_separated, AttributeValue};
use crate::entity::Entity;
use crate::id::EntityId;

/// One statement of the output graph: `#<id> = <TYPE>(<attr>, ...);`
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: EntityId,
    entity: Entity,
}

impl Record {
    pub fn new(id: EntityId, entity: Entity) -> Self {
        Self { id, entity }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    #[inline]
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.entity.type_name()
    }

    pub fn attributes(&self) -> Vec<AttributeValue> {
        self.entity.attributes()
    }

    pub fn references(&self) -> Vec<EntityId> {
        self.entity.references()
    }

    /// Append the STEP statement for this record (without line break)
    pub fn write_step(&self, out: &mut String) {
        out.push_str(&self.id.to_string());
        out.push_str(" = ");
        out.push_str(self.type_name());
        out.push('(');
        write_separated(&self.attributes(), out);
        out.push_str(");");
    }

    /// STEP statement for this record
    pub fn to_step(&self) -> String {
        let mut out = String::with_capacity(64);
        self.write_step(&mut out);
        out
    }
}
