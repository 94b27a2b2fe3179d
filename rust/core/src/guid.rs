// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Globally unique tags (`IfcGloballyUniqueId`)
//!
//! A 128-bit UUID compressed into 22 characters of the IFC base-64
//! alphabet. The first character carries the top 2 bits, each following
//! character 6 bits. Tags are independent of record identifiers.

use std::fmt;

use uuid::Uuid;

const ALPHABET: &[u8; 64] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Length of a compressed tag
pub const GLOBAL_ID_LEN: usize = 22;

/// 22-character globally unique tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalId(String);

impl GlobalId {
    /// Compress a UUID into a tag
    pub fn from_uuid(uuid: Uuid) -> Self {
        let value = uuid.as_u128();
        let mut out = String::with_capacity(GLOBAL_ID_LEN);
        out.push(ALPHABET[(value >> 126) as usize & 0x03] as char);
        for i in 1..GLOBAL_ID_LEN {
            let shift = 6 * (GLOBAL_ID_LEN - 1 - i);
            out.push(ALPHABET[(value >> shift) as usize & 0x3f] as char);
        }
        Self(out)
    }

    /// Fresh random tag
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Expand a tag back into its UUID
    pub fn to_uuid(&self) -> Option<Uuid> {
        if self.0.len() != GLOBAL_ID_LEN {
            return None;
        }
        let mut value: u128 = 0;
        for (i, byte) in self.0.bytes().enumerate() {
            let digit = ALPHABET.iter().position(|&c| c == byte)? as u128;
            if i == 0 && digit > 0x03 {
                return None;
            }
            value = (value << if i == 0 { 0 } else { 6 }) | digit;
        }
        Some(Uuid::from_u128(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of tags for rooted records (project, spatial elements, products, relationships)
pub trait GlobalIdSource {
    fn next_global_id(&mut self) -> GlobalId;
}

/// Random UUID v4 tags
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomGlobalIds;

impl GlobalIdSource for RandomGlobalIds {
    fn next_global_id(&mut self) -> GlobalId {
        GlobalId::random()
    }
}

/// Reproducible tags derived from a counter, for byte-stable output
#[derive(Debug, Default, Clone)]
pub struct SequentialGlobalIds {
    counter: u128,
}

impl SequentialGlobalIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GlobalIdSource for SequentialGlobalIds {
    fn next_global_id(&mut self) -> GlobalId {
        self.counter += 1;
        GlobalId::from_uuid(Uuid::from_u128(self.counter))
    }
}
