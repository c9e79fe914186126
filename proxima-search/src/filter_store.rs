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

//! Dense element-id -> bloom-mask table.
//!
//! One `AtomicU32` per id in the shard's range. Reads are Relaxed loads on
//! the query hot path; writes happen only under the engine's element lock.
//! A reader racing a writer may observe a stale mask, which costs prefilter
//! precision, never correctness: the selector re-validates the element that
//! is actually fetched from the store.

use std::sync::atomic::{AtomicU32, Ordering};

use proxima_core::IdRange;

pub struct FilterStore {
    range: IdRange,
    masks: Vec<AtomicU32>,
}

impl FilterStore {
    pub fn new(range: IdRange) -> Self {
        let mut masks = Vec::with_capacity(range.count() as usize);
        masks.resize_with(range.count() as usize, || AtomicU32::new(0));
        Self { range, masks }
    }

    #[inline]
    pub fn range(&self) -> IdRange {
        self.range
    }

    /// Mask for `id`; 0 for ids outside the range. Out-of-range ids are
    /// also rejected by the element store's range check before any fetch.
    #[inline]
    pub fn get(&self, id: u32) -> u32 {
        match self.range.offset(id) {
            Some(i) => self.masks[i].load(Ordering::Relaxed),
            None => 0,
        }
    }

    /// Overwrites the mask for `id`. Out-of-range ids are ignored; the
    /// indexing gate has already rejected them.
    #[inline]
    pub fn set(&self, id: u32, mask: u32) {
        if let Some(i) = self.range.offset(id) {
            self.masks[i].store(mask, Ordering::Relaxed);
        }
    }
}
