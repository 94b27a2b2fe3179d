// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record identifiers and the per-session identifier allocator.

use std::fmt;

use crate::error::{Error, Result};

/// Identifier of one record in the output graph (`#123`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Wrap a raw identifier read back from a file; zero is not a valid identifier
    pub fn from_raw(raw: u32) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    /// Raw numeric value
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic identifier allocator owned by one export session.
///
/// Identifiers start at the seed (1 by default) and are never reused.
/// A bounded range lets several concurrent sessions partition the
/// identifier space without sharing a counter.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
    /// Inclusive upper bound
    last: u32,
}

impl IdAllocator {
    /// Allocator over the full identifier space, starting at #1
    pub fn new() -> Self {
        Self { next: 1, last: u32::MAX }
    }

    /// Allocator starting at `seed` (must be positive)
    pub fn with_seed(seed: u32) -> Result<Self> {
        Self::with_range(seed, u32::MAX)
    }

    /// Allocator confined to `start..=end`
    pub fn with_range(start: u32, end: u32) -> Result<Self> {
        if start == 0 || end < start {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { next: start, last: end })
    }

    /// Draw the next identifier
    pub fn next_id(&mut self) -> Result<EntityId> {
        if self.next == 0 || self.next > self.last {
            return Err(Error::AllocatorExhausted {
                last: self.last,
            });
        }
        let id = EntityId(self.next);
        // Wraps to 0 after u32::MAX, which marks the allocator exhausted
        self.next = self.next.wrapping_add(1);
        Ok(id)
    }

    /// Identifier the next call to [`next_id`](Self::next_id) would return
    pub fn peek(&self) -> Option<EntityId> {
        (self.next != 0 && self.next <= self.last).then_some(EntityId(self.next))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
