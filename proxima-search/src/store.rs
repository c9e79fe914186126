// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Store contracts consumed by the typeahead engine.
//!
//! The engine never owns persistence: elements live in an id-addressed
//! element store, adjacency in a weighted connections store. Both must be
//! internally synchronized — queries read them concurrently with the
//! engine's serialized writers. In-memory reference implementations live
//! in [`crate::memory`].

use std::sync::Arc;

use proxima_core::{Element, Result};

/// Id-addressed element storage over one shard's id range.
pub trait ElementStore<E: Element>: Send + Sync {
    /// First id of the store's partition.
    fn index_start(&self) -> u32;

    /// Number of ids in the partition.
    fn capacity(&self) -> u32;

    /// Whether `id` falls inside the partition. This is a range check, not
    /// a presence check; use [`get_element`](Self::get_element) for presence.
    fn has_index(&self, id: u32) -> bool;

    /// Immutable snapshot of the element at `id`, if one is stored.
    fn get_element(&self, id: u32) -> Option<Arc<E>>;

    /// Stores `element` at `id`. `timestamp` is the update clock the store
    /// may use for conflict resolution and recovery.
    fn set_element(&self, id: u32, element: E, timestamp: u64) -> Result<()>;

    /// Makes prior writes durable.
    fn persist(&self) -> Result<()>;
}

/// Weighted adjacency storage: per-source packed `(target, weight)` lists.
pub trait ConnectionsStore: Send + Sync {
    /// Whether an adjacency record exists for `id`.
    fn has_index(&self, id: u32) -> bool;

    /// Encoded byte length of the record for `id` (0 when absent).
    fn byte_length(&self, id: u32) -> usize;

    /// Full read into a fresh allocation.
    fn get_bytes(&self, id: u32) -> Result<Vec<u8>>;

    /// Full read into `buf`. Returns the byte count written, or `None`
    /// when `buf` is too small for the whole record (nothing is written;
    /// the caller falls back to [`get_bytes`](Self::get_bytes)).
    fn get_bytes_into(&self, id: u32, buf: &mut [u8]) -> Result<Option<usize>>;

    /// Best-effort prefix read into `buf`: writes as much of the record as
    /// fits and returns the byte count. A truncated edge list is a valid,
    /// shorter edge list.
    fn read_bytes(&self, id: u32, buf: &mut [u8]) -> Result<usize>;

    /// The record decomposed into parallel `(targets, weights)` arrays.
    fn get_weight_data(&self, id: u32) -> (Vec<u32>, Vec<u32>);

    /// Stored strength of the edge `source -> target`, 0 when absent.
    fn get_weight(&self, source: u32, target: u32) -> u32;

    /// Upserts the edge `source -> target`. Writes for the same edge are
    /// last-writer-wins by `timestamp`.
    fn set_weight(&self, source: u32, target: u32, strength: u32, timestamp: u64) -> Result<()>;

    /// Removes the edge `source -> target`, subject to the same
    /// last-writer-wins rule.
    fn remove(&self, source: u32, target: u32, timestamp: u64) -> Result<()>;

    /// Makes prior writes durable.
    fn persist(&self) -> Result<()>;
}
