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

//! Bounded scratch-buffer pool for adjacency decoding.
//!
//! Typeahead queries dominate allocation pressure: every query decodes at
//! least one packed edge list. Reusing fixed-size scratch buffers keeps the
//! steady state allocation-free. The pool is deliberately bounded and only
//! re-admits buffers of the canonical size, so one oversized record cannot
//! poison it and it cannot grow without limit.

use parking_lot::Mutex;

/// Thread-safe LIFO pool of `Vec<u8>` buffers, each exactly `buf_size`
/// bytes long.
pub struct BytesPool {
    buffers: Mutex<Vec<Vec<u8>>>,
    max_pooled: usize,
    buf_size: usize,
}

impl BytesPool {
    pub fn new(max_pooled: usize, buf_size: usize) -> Self {
        Self {
            buffers: Mutex::new(Vec::with_capacity(max_pooled.min(16))),
            max_pooled,
            buf_size,
        }
    }

    /// Canonical buffer size in bytes.
    #[inline]
    pub fn buf_size(&self) -> usize {
        self.buf_size
    }

    /// Maximum number of buffers the pool retains.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_pooled
    }

    /// Non-blocking take; `None` when the pool is empty.
    pub fn get(&self) -> Option<Vec<u8>> {
        self.buffers.lock().pop()
    }

    /// Pooled buffer, or a freshly allocated canonical-size one.
    pub fn get_or_alloc(&self) -> Vec<u8> {
        self.get().unwrap_or_else(|| vec![0u8; self.buf_size])
    }

    /// Returns a buffer to the pool. Rejected (and dropped) unless it is
    /// exactly the canonical size and the pool is below capacity.
    pub fn put(&self, buf: Vec<u8>) -> bool {
        if buf.len() != self.buf_size {
            return false;
        }
        let mut buffers = self.buffers.lock();
        if buffers.len() >= self.max_pooled {
            return false;
        }
        buffers.push(buf);
        true
    }

    /// Number of buffers currently pooled.
    pub fn len(&self) -> usize {
        self.buffers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.lock().is_empty()
    }
}
