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

//! 32-bit prefix bloom masks for the typeahead prefilter.
//!
//! Each indexed element is summarized into a single `u32` mask; each query
//! produces a mask from its terms. A candidate survives the prefilter iff
//! `(elem_mask & query_mask) == query_mask`. False positives are fine (the
//! selector re-validates every candidate); false negatives are not.
//!
//! Because typeahead queries are *prefixes* of element terms, the index
//! side sets one bit per prefix of every term while the query side sets one
//! bit per term as typed. Both sides cap at `max_prefix_len` characters so
//! a long query still lands on a bit the index has set.

/// Pluggable term-mask hash. The engine only depends on the superset
/// contract: for any element terms E and query terms Q where every q in Q
/// is a prefix of some e in E, `index_filter(E) & query_filter(Q) ==
/// query_filter(Q)`.
pub trait TermBloom: Send + Sync {
    /// Mask summarizing an element's terms at index time.
    fn index_filter(&self, terms: &[&str]) -> u32;

    /// Mask summarizing a query's terms.
    fn query_filter(&self, terms: &[&str]) -> u32;
}

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Default [`TermBloom`]: FNV-1a over lowercased character prefixes.
#[derive(Debug, Clone, Copy)]
pub struct FnvTermBloom {
    max_prefix_len: usize,
}

impl FnvTermBloom {
    pub const MAX_PREFIX_LEN_DEFAULT: usize = 8;

    pub fn new(max_prefix_len: usize) -> Self {
        Self {
            max_prefix_len: max_prefix_len.max(1),
        }
    }

    /// Runs FNV-1a char by char, invoking `emit` with the running hash
    /// after each of the first `max_prefix_len` characters.
    fn hash_prefixes<F: FnMut(u32)>(&self, term: &str, mut emit: F) {
        let mut hash = FNV_OFFSET_BASIS;
        let mut buf = [0u8; 4];
        for (count, ch) in term.chars().flat_map(char::to_lowercase).enumerate() {
            if count >= self.max_prefix_len {
                break;
            }
            for &b in ch.encode_utf8(&mut buf).as_bytes() {
                hash = (hash ^ u32::from(b)).wrapping_mul(FNV_PRIME);
            }
            emit(hash);
        }
    }
}

impl Default for FnvTermBloom {
    fn default() -> Self {
        Self::new(Self::MAX_PREFIX_LEN_DEFAULT)
    }
}

impl TermBloom for FnvTermBloom {
    fn index_filter(&self, terms: &[&str]) -> u32 {
        let mut mask = 0u32;
        for term in terms {
            self.hash_prefixes(term, |hash| mask |= 1 << (hash % 32));
        }
        mask
    }

    fn query_filter(&self, terms: &[&str]) -> u32 {
        let mut mask = 0u32;
        for term in terms {
            // Only the bit of the full (capped) term: the index side has
            // already set a bit for every prefix length.
            let mut last = None;
            self.hash_prefixes(term, |hash| last = Some(hash));
            if let Some(hash) = last {
                mask |= 1 << (hash % 32);
            }
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passes(elem_mask: u32, query_mask: u32) -> bool {
        (elem_mask & query_mask) == query_mask
    }

    #[test]
    fn test_prefix_query_never_false_negative() {
        let bloom = FnvTermBloom::default();
        let elem = bloom.index_filter(&["alice", "smith"]);

        for q in ["a", "al", "ali", "alic", "alice", "s", "sm", "smi"] {
            let query = bloom.query_filter(&[q]);
            assert!(passes(elem, query), "prefix {q:?} must pass the prefilter");
        }
    }

    #[test]
    fn test_full_term_subset_passes() {
        let bloom = FnvTermBloom::default();
        let elem = bloom.index_filter(&["alpha", "beta", "gamma"]);
        let query = bloom.query_filter(&["beta", "gamma"]);
        assert!(passes(elem, query));
    }

    #[test]
    fn test_query_longer_than_cap_still_passes() {
        let bloom = FnvTermBloom::new(4);
        let elem = bloom.index_filter(&["constantinople"]);
        // Both sides cap at 4 chars, so the long query maps to "cons".
        let query = bloom.query_filter(&["constantin"]);
        assert!(passes(elem, query));
    }

    #[test]
    fn test_case_insensitive() {
        let bloom = FnvTermBloom::default();
        let elem = bloom.index_filter(&["Alice"]);
        let query = bloom.query_filter(&["aL"]);
        assert!(passes(elem, query));
    }

    #[test]
    fn test_unrelated_terms_mostly_rejected() {
        let bloom = FnvTermBloom::default();
        let elem = bloom.index_filter(&["alice"]);

        // Single-bit query masks: a miss is expected for most unrelated
        // terms, though a 1-in-32 collision is legal.
        let rejected = ["bob", "carol", "dave", "erin", "frank", "grace", "heidi"]
            .iter()
            .filter(|t| !passes(elem, bloom.query_filter(&[t])))
            .count();
        assert!(rejected >= 5, "expected most unrelated terms rejected");
    }

    #[test]
    fn test_empty_terms_mask_is_zero() {
        let bloom = FnvTermBloom::default();
        assert_eq!(bloom.index_filter(&[]), 0);
        assert_eq!(bloom.query_filter(&[]), 0);
        assert_eq!(bloom.query_filter(&[""]), 0);
    }
}
