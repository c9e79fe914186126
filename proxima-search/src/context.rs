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

//! Per-query network context.
//!
//! A context snapshots the querying user's 1st-degree adjacency at
//! creation time; the two-hop walk iterates that snapshot, so connection
//! updates made after `create_context` are not reflected in the query.
//! Strictly query-local, never shared across threads.

/// Parallel `ids`/`weights` snapshot of one user's adjacency.
#[derive(Debug, Clone)]
pub struct ConnectionStrengths {
    ids: Vec<u32>,
    weights: Vec<u32>,
}

impl ConnectionStrengths {
    /// Pairs the two arrays; a length mismatch is truncated to the shorter.
    pub fn new(mut ids: Vec<u32>, mut weights: Vec<u32>) -> Self {
        let n = ids.len().min(weights.len());
        ids.truncate(n);
        weights.truncate(n);
        Self { ids, weights }
    }

    #[inline]
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    #[inline]
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Per-query state for network-aware search.
#[derive(Debug, Clone)]
pub struct TypeaheadContext {
    source: u32,
    strengths: Option<ConnectionStrengths>,
    timeout_millis: u64,
}

impl TypeaheadContext {
    /// Context without an adjacency snapshot; `search_network` falls back
    /// to the single-hop path. Timeout starts disabled.
    pub fn new(source: u32) -> Self {
        Self {
            source,
            strengths: None,
            timeout_millis: u64::MAX,
        }
    }

    /// The network center; never returned as a hit.
    #[inline]
    pub fn source(&self) -> u32 {
        self.source
    }

    /// The 1st-degree neighbor ids, when a snapshot is present. Its
    /// absence routes `search_network` to the single-hop fallback.
    pub fn connections(&self) -> Option<&[u32]> {
        self.strengths.as_ref().map(ConnectionStrengths::ids)
    }

    pub fn strengths(&self) -> Option<&ConnectionStrengths> {
        self.strengths.as_ref()
    }

    pub fn set_strengths(&mut self, strengths: ConnectionStrengths) {
        self.strengths = Some(strengths);
    }

    #[inline]
    pub fn timeout_millis(&self) -> u64 {
        self.timeout_millis
    }

    pub fn set_timeout_millis(&mut self, timeout_millis: u64) {
        self.timeout_millis = timeout_millis;
    }
}
