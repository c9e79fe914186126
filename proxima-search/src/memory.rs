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

//! In-memory reference stores.
//!
//! Process-lifetime implementations of the store contracts, internally
//! synchronized so query readers can run concurrently with the engine's
//! serialized writers. `persist` is a no-op for both.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use byteorder::{ByteOrder, LittleEndian};
use dashmap::DashMap;
use parking_lot::RwLock;

use proxima_core::{Element, IdRange, Result};

use crate::store::{ConnectionsStore, ElementStore};
use crate::weight_iter::PAIR_BYTES;

/// Dense element table over an [`IdRange`].
pub struct MemoryElementStore<E: Element> {
    range: IdRange,
    slots: RwLock<Vec<Option<Arc<E>>>>,
    /// High-water mark of applied update timestamps.
    max_timestamp: AtomicU64,
}

impl<E: Element> MemoryElementStore<E> {
    pub fn new(range: IdRange) -> Self {
        Self {
            range,
            slots: RwLock::new(vec![None; range.count() as usize]),
            max_timestamp: AtomicU64::new(0),
        }
    }

    /// Latest update timestamp applied to the store.
    pub fn max_timestamp(&self) -> u64 {
        self.max_timestamp.load(Ordering::Relaxed)
    }
}

impl<E: Element> ElementStore<E> for MemoryElementStore<E> {
    fn index_start(&self) -> u32 {
        self.range.start()
    }

    fn capacity(&self) -> u32 {
        self.range.count()
    }

    fn has_index(&self, id: u32) -> bool {
        self.range.contains(id)
    }

    fn get_element(&self, id: u32) -> Option<Arc<E>> {
        let i = self.range.offset(id)?;
        self.slots.read()[i].clone()
    }

    fn set_element(&self, id: u32, element: E, timestamp: u64) -> Result<()> {
        if let Some(i) = self.range.offset(id) {
            self.slots.write()[i] = Some(Arc::new(element));
            self.max_timestamp.fetch_max(timestamp, Ordering::Relaxed);
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct WeightEntry {
    target: u32,
    weight: u32,
    timestamp: u64,
}

/// Keyed adjacency table; edge lists keep first-insertion order.
#[derive(Default)]
pub struct MemoryConnectionsStore {
    edges: DashMap<u32, Vec<WeightEntry>>,
}

impl MemoryConnectionsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode_into(entries: &[WeightEntry], buf: &mut [u8]) -> usize {
        let mut pos = 0;
        for e in entries {
            if pos + PAIR_BYTES > buf.len() {
                break;
            }
            LittleEndian::write_u32(&mut buf[pos..pos + 4], e.target);
            LittleEndian::write_u32(&mut buf[pos + 4..pos + PAIR_BYTES], e.weight);
            pos += PAIR_BYTES;
        }
        pos
    }
}

impl ConnectionsStore for MemoryConnectionsStore {
    fn has_index(&self, id: u32) -> bool {
        self.edges.contains_key(&id)
    }

    fn byte_length(&self, id: u32) -> usize {
        self.edges.get(&id).map_or(0, |e| e.len() * PAIR_BYTES)
    }

    fn get_bytes(&self, id: u32) -> Result<Vec<u8>> {
        match self.edges.get(&id) {
            Some(entries) => {
                let mut out = vec![0u8; entries.len() * PAIR_BYTES];
                Self::encode_into(&entries, &mut out);
                Ok(out)
            }
            None => Ok(Vec::new()),
        }
    }

    fn get_bytes_into(&self, id: u32, buf: &mut [u8]) -> Result<Option<usize>> {
        match self.edges.get(&id) {
            Some(entries) => {
                let needed = entries.len() * PAIR_BYTES;
                if needed > buf.len() {
                    return Ok(None);
                }
                Ok(Some(Self::encode_into(&entries, buf)))
            }
            None => Ok(Some(0)),
        }
    }

    fn read_bytes(&self, id: u32, buf: &mut [u8]) -> Result<usize> {
        match self.edges.get(&id) {
            Some(entries) => Ok(Self::encode_into(&entries, buf)),
            None => Ok(0),
        }
    }

    fn get_weight_data(&self, id: u32) -> (Vec<u32>, Vec<u32>) {
        match self.edges.get(&id) {
            Some(entries) => entries.iter().map(|e| (e.target, e.weight)).unzip(),
            None => (Vec::new(), Vec::new()),
        }
    }

    fn get_weight(&self, source: u32, target: u32) -> u32 {
        self.edges.get(&source).map_or(0, |entries| {
            entries
                .iter()
                .find(|e| e.target == target)
                .map_or(0, |e| e.weight)
        })
    }

    fn set_weight(&self, source: u32, target: u32, strength: u32, timestamp: u64) -> Result<()> {
        let mut entries = self.edges.entry(source).or_default();
        match entries.iter_mut().find(|e| e.target == target) {
            Some(e) => {
                if timestamp >= e.timestamp {
                    e.weight = strength;
                    e.timestamp = timestamp;
                }
            }
            None => entries.push(WeightEntry {
                target,
                weight: strength,
                timestamp,
            }),
        }
        Ok(())
    }

    fn remove(&self, source: u32, target: u32, timestamp: u64) -> Result<()> {
        if let Some(mut entries) = self.edges.get_mut(&source) {
            entries.retain(|e| e.target != target || e.timestamp > timestamp);
        }
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxima_core::TermElement;

    #[test]
    fn test_element_store_roundtrip() {
        let store = MemoryElementStore::new(IdRange::new(10, 10));
        store
            .set_element(12, TermElement::new(12, 5, vec!["ann"]), 5)
            .unwrap();

        assert!(store.has_index(12));
        assert!(store.has_index(19));
        assert!(!store.has_index(20));
        assert_eq!(store.get_element(12).unwrap().terms(), &["ann".to_string()]);
        assert!(store.get_element(13).is_none());
        assert_eq!(store.max_timestamp(), 5);
    }

    #[test]
    fn test_element_store_out_of_range_write_ignored() {
        let store = MemoryElementStore::new(IdRange::new(0, 4));
        store
            .set_element(4, TermElement::new(4, 1, vec!["x"]), 1)
            .unwrap();
        assert!(store.get_element(4).is_none());
    }

    #[test]
    fn test_connections_roundtrip_via_bytes() {
        let store = MemoryConnectionsStore::new();
        store.set_weight(1, 10, 3, 1).unwrap();
        store.set_weight(1, 20, 7, 2).unwrap();

        assert!(store.has_index(1));
        assert!(!store.has_index(2));
        assert_eq!(store.byte_length(1), 2 * PAIR_BYTES);

        let bytes = store.get_bytes(1).unwrap();
        let iter = crate::weight_iter::WeightIterator::new(bytes, 0, 2 * PAIR_BYTES);
        assert_eq!(iter.collect::<Vec<_>>(), vec![(10, 3), (20, 7)]);
    }

    #[test]
    fn test_get_bytes_into_too_small() {
        let store = MemoryConnectionsStore::new();
        store.set_weight(1, 10, 3, 1).unwrap();
        store.set_weight(1, 20, 7, 2).unwrap();

        let mut small = [0u8; PAIR_BYTES];
        assert_eq!(store.get_bytes_into(1, &mut small).unwrap(), None);

        let mut fit = [0u8; 2 * PAIR_BYTES];
        assert_eq!(store.get_bytes_into(1, &mut fit).unwrap(), Some(2 * PAIR_BYTES));
    }

    #[test]
    fn test_read_bytes_truncates_to_whole_pairs() {
        let store = MemoryConnectionsStore::new();
        for t in 0..4 {
            store.set_weight(1, t, 1, 1).unwrap();
        }
        let mut buf = [0u8; 2 * PAIR_BYTES + 3];
        let n = store.read_bytes(1, &mut buf).unwrap();
        assert_eq!(n, 2 * PAIR_BYTES);
    }

    #[test]
    fn test_last_writer_wins() {
        let store = MemoryConnectionsStore::new();
        store.set_weight(1, 10, 3, 100).unwrap();
        store.set_weight(1, 10, 9, 50).unwrap(); // stale, ignored
        assert_eq!(store.get_weight(1, 10), 3);

        store.set_weight(1, 10, 9, 200).unwrap();
        assert_eq!(store.get_weight(1, 10), 9);
    }

    #[test]
    fn test_remove_respects_timestamps() {
        let store = MemoryConnectionsStore::new();
        store.set_weight(1, 10, 3, 100).unwrap();
        store.remove(1, 10, 50).unwrap(); // stale removal
        assert_eq!(store.get_weight(1, 10), 3);

        store.remove(1, 10, 150).unwrap();
        assert_eq!(store.get_weight(1, 10), 0);
        assert!(store.get_weight_data(1).0.is_empty());
    }

    #[test]
    fn test_weight_data_parallel_arrays() {
        let store = MemoryConnectionsStore::new();
        store.set_weight(5, 1, 10, 1).unwrap();
        store.set_weight(5, 2, 20, 1).unwrap();
        let (ids, weights) = store.get_weight_data(5);
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(weights, vec![10, 20]);
    }

    #[test]
    fn test_absent_edge_weight_is_zero() {
        let store = MemoryConnectionsStore::new();
        assert_eq!(store.get_weight(1, 2), 0);
        store.set_weight(1, 3, 4, 1).unwrap();
        assert_eq!(store.get_weight(1, 2), 0);
    }
}
