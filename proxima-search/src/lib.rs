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

//! Proxima Search
//!
//! Weighted social-graph typeahead: given a querying user and a list of
//! prefix terms, return the top-scoring elements reachable within the
//! user's 1st- and 2nd-degree neighborhood. Each edge carries a connection
//! strength; a hit's score is the selector score times the strength of the
//! path that reached it.
//!
//! ## Query pipeline
//!
//! ```text
//! terms ──> TermBloom::query_filter ──> query mask
//! uid ──> ConnectionsStore bytes ──> WeightIterator ──> FilterStore check
//!     ──> ElementStore fetch ──> Selector ──> Collector
//! ```
//!
//! The two-hop walk repeats the inner chain for every 1st-degree neighbor
//! with its inherited strength, deduplicating across overlapping paths.
//!
//! ## Why the shape is what it is
//!
//! A single query browses up to tens of thousands of weighted edges. The
//! per-element bloom mask ([`filter_store`]) rejects the vast majority with
//! one `AtomicU32` load and a mask test before any element is fetched; the
//! byte-buffer pool ([`bytes_pool`]) keeps edge-list decoding allocation-free
//! in steady state; the deadline is polled coarsely (every 100 edges) so the
//! hot loop stays branch-light. Updates never block queries: writers
//! serialize on per-store locks while readers run lock-free against the
//! filter store and internally-synchronized stores.

pub mod adjuster;
pub mod bloom;
pub mod bytes_pool;
pub mod collector;
pub mod config;
pub mod context;
pub mod filter_store;
pub mod memory;
pub mod selector;
pub mod stats;
pub mod store;
pub mod typeahead;
pub mod weight_iter;

pub use adjuster::{AdditiveWeightAdjuster, WeightAdjuster};
pub use bloom::{FnvTermBloom, TermBloom};
pub use bytes_pool::BytesPool;
pub use collector::{Collector, Hit, Proximity, SimpleCollector};
pub use config::TypeaheadConfig;
pub use context::{ConnectionStrengths, TypeaheadContext};
pub use filter_store::FilterStore;
pub use memory::{MemoryConnectionsStore, MemoryElementStore};
pub use selector::{PrefixSelector, PrefixSelectorFactory, Selector, SelectorContext, SelectorFactory};
pub use stats::HitStats;
pub use store::{ConnectionsStore, ElementStore};
pub use typeahead::WeightedNetworkTypeahead;
pub use weight_iter::WeightIterator;

// Re-export the shared domain types so engine users need a single import.
pub use proxima_core::{
    AcceptAllConnectionFilter, Connection, ConnectionFilter, Element, IdRange, ProximaError,
    Result, SourceRangeConnectionFilter, TermElement,
};
