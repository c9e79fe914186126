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

//! Lazy decoder over packed adjacency bytes.
//!
//! Adjacency records travel as consecutive little-endian `(target_id: u32,
//! weight: u32)` pairs, 8 bytes per edge. The iterator owns the scratch
//! buffer for its lifetime and hands it back through [`into_buffer`] so the
//! caller can return it to the pool — the buffer may not be the one the
//! caller started with if the record forced a larger allocation upstream.
//!
//! [`into_buffer`]: WeightIterator::into_buffer

use byteorder::{ByteOrder, LittleEndian};

/// Bytes per encoded `(target_id, weight)` pair.
pub const PAIR_BYTES: usize = 8;

/// Forward-only, non-restartable decoder yielding `(element_id, weight)`.
pub struct WeightIterator {
    buf: Vec<u8>,
    pos: usize,
    end: usize,
}

impl WeightIterator {
    /// Decodes `len` bytes starting at `offset`. A trailing fragment
    /// shorter than one pair is ignored, which makes truncated
    /// partial reads safe to walk.
    pub fn new(buf: Vec<u8>, offset: usize, len: usize) -> Self {
        let end = offset.saturating_add(len).min(buf.len());
        Self {
            buf,
            pos: offset.min(end),
            end,
        }
    }

    /// Number of complete pairs left.
    pub fn remaining(&self) -> usize {
        (self.end - self.pos) / PAIR_BYTES
    }

    /// Recovers the underlying buffer for reuse.
    pub fn into_buffer(self) -> Vec<u8> {
        self.buf
    }
}

impl Iterator for WeightIterator {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        if self.pos + PAIR_BYTES > self.end {
            return None;
        }
        let id = LittleEndian::read_u32(&self.buf[self.pos..]);
        let weight = LittleEndian::read_u32(&self.buf[self.pos + 4..]);
        self.pos += PAIR_BYTES;
        Some((id, weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

/// Encodes `(target_id, weight)` pairs into `out` in wire order.
pub fn encode_pairs(pairs: &[(u32, u32)], out: &mut Vec<u8>) {
    out.reserve(pairs.len() * PAIR_BYTES);
    let mut scratch = [0u8; PAIR_BYTES];
    for &(id, weight) in pairs {
        LittleEndian::write_u32(&mut scratch[..4], id);
        LittleEndian::write_u32(&mut scratch[4..], weight);
        out.extend_from_slice(&scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(pairs: &[(u32, u32)]) -> Vec<u8> {
        let mut out = Vec::new();
        encode_pairs(pairs, &mut out);
        out
    }

    #[test]
    fn test_roundtrip() {
        let pairs = [(10, 3), (20, 0), (u32::MAX, u32::MAX)];
        let bytes = encoded(&pairs);
        let len = bytes.len();
        let iter = WeightIterator::new(bytes, 0, len);
        assert_eq!(iter.collect::<Vec<_>>(), pairs);
    }

    #[test]
    fn test_trailing_fragment_ignored() {
        let mut bytes = encoded(&[(1, 2)]);
        bytes.extend_from_slice(&[0xab, 0xcd, 0xef]); // not a full pair
        let len = bytes.len();
        let mut iter = WeightIterator::new(bytes, 0, len);
        assert_eq!(iter.next(), Some((1, 2)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_offset_and_len_window() {
        let bytes = encoded(&[(1, 1), (2, 2), (3, 3)]);
        let iter = WeightIterator::new(bytes, PAIR_BYTES, PAIR_BYTES);
        assert_eq!(iter.collect::<Vec<_>>(), vec![(2, 2)]);
    }

    #[test]
    fn test_len_clamped_to_buffer() {
        let bytes = encoded(&[(5, 6)]);
        let iter = WeightIterator::new(bytes, 0, 1 << 20);
        assert_eq!(iter.collect::<Vec<_>>(), vec![(5, 6)]);
    }

    #[test]
    fn test_into_buffer_returns_storage() {
        let bytes = encoded(&[(1, 2), (3, 4)]);
        let cap = bytes.capacity();
        let mut iter = WeightIterator::new(bytes, 0, 2 * PAIR_BYTES);
        iter.next();
        let buf = iter.into_buffer();
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf.len(), 2 * PAIR_BYTES);
    }

    #[test]
    fn test_size_hint() {
        let bytes = encoded(&[(1, 1), (2, 2)]);
        let mut iter = WeightIterator::new(bytes, 0, 2 * PAIR_BYTES);
        assert_eq!(iter.size_hint(), (2, Some(2)));
        iter.next();
        assert_eq!(iter.size_hint(), (1, Some(1)));
    }

    #[test]
    fn test_empty() {
        let mut iter = WeightIterator::new(Vec::new(), 0, 0);
        assert_eq!(iter.next(), None);
    }
}
