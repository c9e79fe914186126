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

//! The weighted network typeahead engine.
//!
//! One engine instance serves one shard of the element-id space. Queries
//! walk the querying user's 1st-degree (and, with a context, 2nd-degree)
//! weighted adjacency, prefilter candidates through the per-element bloom
//! masks, validate survivors with the selector and feed the collector
//! until it is satisfied or the deadline passes. Index operations mutate
//! the element and connection stores under two independent locks, keeping
//! the filter store in lockstep with the element store.
//!
//! Queries take no lock: readers race writers by design and tolerate a
//! stale bloom mask because the selector re-validates every candidate
//! against the element actually fetched.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use proxima_core::{Connection, ConnectionFilter, Element, IdRange, Result};

use crate::adjuster::{AdditiveWeightAdjuster, WeightAdjuster};
use crate::bloom::TermBloom;
use crate::bytes_pool::BytesPool;
use crate::collector::{Collector, Proximity, SimpleCollector};
use crate::config::TypeaheadConfig;
use crate::context::{ConnectionStrengths, TypeaheadContext};
use crate::filter_store::FilterStore;
use crate::selector::{Selector, SelectorContext, SelectorFactory};
use crate::stats::HitStats;
use crate::store::{ConnectionsStore, ElementStore};
use crate::weight_iter::WeightIterator;

/// Deadline poll granularity, in browsed edges.
const DEADLINE_POLL_EDGES: u64 = 100;

/// Outcome of reading one user's adjacency into a scratch buffer.
enum StrengthRead {
    /// The record, ready to walk. The iterator owns the buffer.
    Edges(WeightIterator),
    /// No record (or an empty one); the untouched buffer comes back.
    Empty(Vec<u8>),
}

pub struct WeightedNetworkTypeahead<E: Element> {
    name: String,
    element_store: Arc<dyn ElementStore<E>>,
    connections_store: Arc<dyn ConnectionsStore>,
    selector_factory: Box<dyn SelectorFactory<E>>,
    bloom: Box<dyn TermBloom>,
    conn_filter: Box<dyn ConnectionFilter>,
    weight_adjuster: Box<dyn WeightAdjuster>,
    filter_store: FilterStore,
    range: IdRange,
    bytes_pool: BytesPool,
    byte_array_size: usize,
    logging_enabled: AtomicBool,
    partial_read_enabled: AtomicBool,
    element_lock: Mutex<()>,
    connections_lock: Mutex<()>,
}

impl<E: Element> WeightedNetworkTypeahead<E> {
    /// Engine with the default weight adjuster and configuration.
    pub fn new(
        name: impl Into<String>,
        element_store: Arc<dyn ElementStore<E>>,
        connections_store: Arc<dyn ConnectionsStore>,
        selector_factory: Box<dyn SelectorFactory<E>>,
        bloom: Box<dyn TermBloom>,
        conn_filter: Box<dyn ConnectionFilter>,
    ) -> Self {
        Self::with_config(
            name,
            element_store,
            connections_store,
            selector_factory,
            bloom,
            conn_filter,
            Box::new(AdditiveWeightAdjuster),
            TypeaheadConfig::default(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_config(
        name: impl Into<String>,
        element_store: Arc<dyn ElementStore<E>>,
        connections_store: Arc<dyn ConnectionsStore>,
        selector_factory: Box<dyn SelectorFactory<E>>,
        bloom: Box<dyn TermBloom>,
        conn_filter: Box<dyn ConnectionFilter>,
        weight_adjuster: Box<dyn WeightAdjuster>,
        config: TypeaheadConfig,
    ) -> Self {
        let name = name.into();
        let range = IdRange::new(element_store.index_start(), element_store.capacity());
        let filter_store = Self::init_filter_store(&name, range, element_store.as_ref(), bloom.as_ref());

        let engine = Self {
            name,
            element_store,
            connections_store,
            selector_factory,
            bloom,
            conn_filter,
            weight_adjuster,
            filter_store,
            range,
            bytes_pool: BytesPool::new(config.bytes_pool_size, config.byte_array_size),
            byte_array_size: config.byte_array_size,
            logging_enabled: AtomicBool::new(config.logging_enabled),
            partial_read_enabled: AtomicBool::new(config.partial_read_enabled),
            element_lock: Mutex::new(()),
            connections_lock: Mutex::new(()),
        };
        engine.list_properties();
        info!("{} started", engine.name);
        engine
    }

    /// Recomputes the bloom mask of every element already in the store.
    fn init_filter_store(
        name: &str,
        range: IdRange,
        element_store: &dyn ElementStore<E>,
        bloom: &dyn TermBloom,
    ) -> FilterStore {
        let start_time = Instant::now();
        let store = FilterStore::new(range);

        for id in range.start()..range.end() {
            if let Some(element) = element_store.get_element(id) {
                store.set(id, index_mask(bloom, element.as_ref()));
            }
        }

        info!(
            "{} init filter store: {} ms",
            name,
            start_time.elapsed().as_millis()
        );
        store
    }

    fn list_properties(&self) {
        info!("# name: {}", self.name);
        info!("# range: {}", self.range);
        info!("# connectionFilter: {}", self.conn_filter.describe());
        info!("# bytesPoolSize: {}", self.bytes_pool_capacity());
        info!("# byteArraySize: {}", self.byte_array_size);
        info!("# loggingEnabled: {}", self.logging_enabled());
        info!("# partialReadEnabled: {}", self.partial_read_enabled());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> IdRange {
        self.range
    }

    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled.load(Ordering::Relaxed)
    }

    pub fn set_logging_enabled(&self, enabled: bool) {
        self.logging_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn partial_read_enabled(&self) -> bool {
        self.partial_read_enabled.load(Ordering::Relaxed)
    }

    pub fn set_partial_read_enabled(&self, enabled: bool) {
        self.partial_read_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Buffers currently idle in the scratch pool.
    pub fn pooled_buffer_count(&self) -> usize {
        self.bytes_pool.len()
    }

    fn bytes_pool_capacity(&self) -> usize {
        self.bytes_pool.capacity()
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    /// Unbounded single-hop search without a deadline.
    pub fn search(&self, uid: u32, terms: &[&str]) -> Vec<Arc<E>> {
        self.search_top(uid, terms, usize::MAX, u64::MAX)
    }

    /// Unbounded single-hop search under a deadline.
    pub fn search_with_timeout(&self, uid: u32, terms: &[&str], timeout_millis: u64) -> Vec<Arc<E>> {
        self.search_top(uid, terms, usize::MAX, timeout_millis)
    }

    /// Top-`max_results` single-hop search under a deadline.
    pub fn search_top(
        &self,
        uid: u32,
        terms: &[&str],
        max_results: usize,
        timeout_millis: u64,
    ) -> Vec<Arc<E>> {
        if terms.is_empty() || max_results < 1 {
            return Vec::new();
        }

        let mut stats = HitStats::new();
        stats.start();

        let mut collector = SimpleCollector::new(max_results);
        let selector = self.selector_factory.create_selector(terms);
        let mut uniq_ids = HashSet::with_capacity(256);
        self.search_internal_dedup(
            uid,
            terms,
            &mut collector,
            selector.as_ref(),
            &mut uniq_ids,
            &mut stats,
            timeout_millis,
        );

        stats.stop();
        if self.logging_enabled() {
            self.log_query(uid, &stats, terms);
        }

        collector.elements()
    }

    /// Single-hop search into a caller-supplied collector. Returns the
    /// query's hit statistics.
    pub fn search_into<C: Collector<E>>(
        &self,
        uid: u32,
        terms: &[&str],
        collector: &mut C,
    ) -> HitStats {
        self.search_into_with_timeout(uid, terms, collector, u64::MAX)
    }

    /// Single-hop search into a caller-supplied collector under a deadline.
    pub fn search_into_with_timeout<C: Collector<E>>(
        &self,
        uid: u32,
        terms: &[&str],
        collector: &mut C,
        timeout_millis: u64,
    ) -> HitStats {
        let mut stats = HitStats::new();
        if terms.is_empty() {
            return stats;
        }

        stats.start();
        let selector = self.selector_factory.create_selector(terms);
        self.search_internal(uid, terms, collector, selector.as_ref(), &mut stats, timeout_millis);
        stats.stop();

        if self.logging_enabled() {
            self.log_query(uid, &stats, terms);
        }
        stats
    }

    /// Two-hop network search. Falls back to the single-hop path when the
    /// context is absent or carries no adjacency snapshot.
    pub fn search_network<C: Collector<E>>(
        &self,
        uid: u32,
        terms: &[&str],
        collector: &mut C,
        context: Option<&TypeaheadContext>,
    ) -> HitStats {
        if terms.is_empty() {
            return HitStats::new();
        }

        let Some(context) = context else {
            return self.search_into(uid, terms, collector);
        };
        if context.connections().is_none() {
            return self.search_into_with_timeout(uid, terms, collector, context.timeout_millis());
        }

        let mut stats = HitStats::new();
        stats.start();

        let source = context.source();
        let selector = self.selector_factory.create_selector(terms);
        self.search_network_internal(source, terms, collector, selector.as_ref(), &mut stats, context);

        stats.stop();
        if self.logging_enabled() {
            if uid != source {
                info!("{} => {}", uid, source);
            }
            self.log_query(uid, &stats, terms);
        }
        stats
    }

    /// Snapshots `uid`'s 1st-degree adjacency for a later network search.
    /// Connection updates after this call are not reflected in the snapshot.
    pub fn create_context(&self, uid: u32) -> TypeaheadContext {
        let mut context = TypeaheadContext::new(uid);
        if self.connections_store.has_index(uid) {
            let (ids, weights) = self.connections_store.get_weight_data(uid);
            context.set_strengths(ConnectionStrengths::new(ids, weights));
        }
        context
    }

    // ------------------------------------------------------------------
    // Query internals
    // ------------------------------------------------------------------

    fn bytes_from_pool(&self) -> Vec<u8> {
        self.bytes_pool.get_or_alloc()
    }

    /// Returns a scratch buffer to the pool. Grown buffers are dropped;
    /// the pool only keeps the canonical size.
    fn recycle(&self, buf: Vec<u8>) {
        if buf.len() == self.byte_array_size {
            self.bytes_pool.put(buf);
        } else if !buf.is_empty() {
            debug!("{} bytes on the fly: {}", self.name, buf.len());
        }
    }

    /// Reads `uid`'s adjacency into `buf`, consuming it. When the pooled
    /// buffer is too small for the record, the canonical buffer goes back
    /// to the pool and a fresh full-size allocation takes its place. On
    /// error the buffer has already been recycled.
    fn strength_iterator(&self, uid: u32, mut buf: Vec<u8>) -> Result<StrengthRead> {
        if !self.connections_store.has_index(uid) {
            return Ok(StrengthRead::Empty(buf));
        }

        let read = if self.partial_read_enabled() {
            match self.connections_store.read_bytes(uid, &mut buf) {
                Ok(n) => n,
                Err(e) => {
                    self.recycle(buf);
                    return Err(e);
                }
            }
        } else {
            match self.connections_store.get_bytes_into(uid, &mut buf) {
                Ok(Some(n)) => n,
                Ok(None) => {
                    if self.connections_store.byte_length(uid) > buf.len() {
                        match self.connections_store.get_bytes(uid) {
                            Ok(fresh) => {
                                self.recycle(buf);
                                buf = fresh;
                                buf.len()
                            }
                            Err(e) => {
                                self.recycle(buf);
                                return Err(e);
                            }
                        }
                    } else {
                        0
                    }
                }
                Err(e) => {
                    self.recycle(buf);
                    return Err(e);
                }
            }
        };

        if read > 0 {
            Ok(StrengthRead::Edges(WeightIterator::new(buf, 0, read)))
        } else {
            Ok(StrengthRead::Empty(buf))
        }
    }

    fn search_internal(
        &self,
        uid: u32,
        terms: &[&str],
        collector: &mut dyn Collector<E>,
        selector: &dyn Selector<E>,
        stats: &mut HitStats,
        timeout_millis: u64,
    ) {
        if !self.connections_store.has_index(uid) {
            return;
        }

        let buf = self.bytes_from_pool();
        match self.strength_iterator(uid, buf) {
            Ok(StrengthRead::Edges(mut iter)) => {
                let query_mask = self.bloom.query_filter(terms);
                self.apply_filter(query_mask, &mut iter, collector, selector, stats, timeout_millis);
                self.recycle(iter.into_buffer());
            }
            Ok(StrengthRead::Empty(buf)) => self.recycle(buf),
            Err(e) => warn!("{} adjacency read failed for user {}: {}", self.name, uid, e),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn search_internal_dedup(
        &self,
        uid: u32,
        terms: &[&str],
        collector: &mut dyn Collector<E>,
        selector: &dyn Selector<E>,
        uniq_ids: &mut HashSet<u32>,
        stats: &mut HitStats,
        timeout_millis: u64,
    ) {
        if !self.connections_store.has_index(uid) {
            return;
        }

        let buf = self.bytes_from_pool();
        match self.strength_iterator(uid, buf) {
            Ok(StrengthRead::Edges(mut iter)) => {
                let query_mask = self.bloom.query_filter(terms);
                self.apply_filter_dedup(
                    query_mask,
                    &mut iter,
                    collector,
                    selector,
                    uniq_ids,
                    stats,
                    timeout_millis,
                );
                self.recycle(iter.into_buffer());
            }
            Ok(StrengthRead::Empty(buf)) => self.recycle(buf),
            Err(e) => warn!("{} adjacency read failed for user {}: {}", self.name, uid, e),
        }
    }

    /// 1st-degree filter loop over a strength iterator.
    fn apply_filter(
        &self,
        query_mask: u32,
        iter: &mut WeightIterator,
        collector: &mut dyn Collector<E>,
        selector: &dyn Selector<E>,
        stats: &mut HitStats,
        timeout_millis: u64,
    ) {
        let start_time = Instant::now();
        let mut browsed = 0u64;
        let mut filtered = 0u64;
        let mut results = 0u64;
        let mut ctx = SelectorContext::new();

        while let Some((elem_id, weight)) = iter.next() {
            browsed += 1;

            if self.element_store.has_index(elem_id)
                && (self.filter_store.get(elem_id) & query_mask) == query_mask
            {
                filtered += 1;

                if let Some(elem) = self.element_store.get_element(elem_id) {
                    if selector.select(elem.as_ref(), &mut ctx) {
                        results += 1;

                        let score = ctx.score() * (f64::from(weight) + 1.0);
                        collector.add(elem, score, &self.name, Proximity::Degree1);
                        if collector.can_stop() {
                            break;
                        }
                    }
                    ctx.clear();
                }
            }

            if browsed % DEADLINE_POLL_EDGES == 0
                && start_time.elapsed().as_millis() as u64 > timeout_millis
            {
                break;
            }
        }

        stats.num_browse_hits += browsed;
        stats.num_filter_hits += filtered;
        stats.num_result_hits += results;
    }

    /// 1st-degree filter loop with external dedup, used when a 2-hop walk
    /// may follow.
    #[allow(clippy::too_many_arguments)]
    fn apply_filter_dedup(
        &self,
        query_mask: u32,
        iter: &mut WeightIterator,
        collector: &mut dyn Collector<E>,
        selector: &dyn Selector<E>,
        uniq_ids: &mut HashSet<u32>,
        stats: &mut HitStats,
        timeout_millis: u64,
    ) {
        let start_time = Instant::now();
        let mut browsed = 0u64;
        let mut filtered = 0u64;
        let mut results = 0u64;
        let mut ctx = SelectorContext::new();

        while let Some((elem_id, weight)) = iter.next() {
            browsed += 1;

            if self.element_store.has_index(elem_id)
                && (self.filter_store.get(elem_id) & query_mask) == query_mask
            {
                filtered += 1;

                if uniq_ids.insert(elem_id) {
                    if let Some(elem) = self.element_store.get_element(elem_id) {
                        if selector.select(elem.as_ref(), &mut ctx) {
                            results += 1;

                            let score = ctx.score() * (f64::from(weight) + 1.0);
                            collector.add(elem, score, &self.name, Proximity::Degree1);
                            if collector.can_stop() {
                                break;
                            }
                        }
                        ctx.clear();
                    }
                }
            }

            if browsed % DEADLINE_POLL_EDGES == 0
                && start_time.elapsed().as_millis() as u64 > timeout_millis
            {
                break;
            }
        }

        stats.num_browse_hits += browsed;
        stats.num_filter_hits += filtered;
        stats.num_result_hits += results;
    }

    /// 1st-degree filter loop over the context's decomposed adjacency.
    #[allow(clippy::too_many_arguments)]
    fn apply_filter_arrays(
        &self,
        query_mask: u32,
        conn_ids: &[u32],
        weights: &[u32],
        collector: &mut dyn Collector<E>,
        selector: &dyn Selector<E>,
        uniq_ids: &mut HashSet<u32>,
        stats: &mut HitStats,
        timeout_millis: u64,
    ) {
        let start_time = Instant::now();
        let mut browsed = 0u64;
        let mut filtered = 0u64;
        let mut results = 0u64;
        let mut ctx = SelectorContext::new();

        for (&elem_id, &weight) in conn_ids.iter().zip(weights) {
            browsed += 1;

            if self.element_store.has_index(elem_id)
                && (self.filter_store.get(elem_id) & query_mask) == query_mask
            {
                filtered += 1;

                if uniq_ids.insert(elem_id) {
                    if let Some(elem) = self.element_store.get_element(elem_id) {
                        if selector.select(elem.as_ref(), &mut ctx) {
                            results += 1;

                            let score = ctx.score() * (f64::from(weight) + 1.0);
                            collector.add(elem, score, &self.name, Proximity::Degree1);
                            if collector.can_stop() {
                                break;
                            }
                        }
                        ctx.clear();
                    }
                }
            }

            if browsed % DEADLINE_POLL_EDGES == 0
                && start_time.elapsed().as_millis() as u64 > timeout_millis
            {
                break;
            }
        }

        stats.num_browse_hits += browsed;
        stats.num_filter_hits += filtered;
        stats.num_result_hits += results;
    }

    /// 2nd-degree filter loop: scores through the adjuster with the
    /// strength inherited from the leading 1st-degree connection.
    #[allow(clippy::too_many_arguments)]
    fn apply_filter_second_degree(
        &self,
        query_mask: u32,
        inherited_strength: u32,
        iter: &mut WeightIterator,
        collector: &mut dyn Collector<E>,
        selector: &dyn Selector<E>,
        uniq_ids: &mut HashSet<u32>,
        stats: &mut HitStats,
        timeout_millis: u64,
    ) {
        let start_time = Instant::now();
        let mut browsed = 0u64;
        let mut filtered = 0u64;
        let mut results = 0u64;
        let mut ctx = SelectorContext::new();

        while let Some((elem_id, weight)) = iter.next() {
            browsed += 1;

            if self.element_store.has_index(elem_id)
                && (self.filter_store.get(elem_id) & query_mask) == query_mask
            {
                filtered += 1;

                if uniq_ids.insert(elem_id) {
                    if let Some(elem) = self.element_store.get_element(elem_id) {
                        if selector.select(elem.as_ref(), &mut ctx) {
                            results += 1;

                            let propagated =
                                self.weight_adjuster.adjust(inherited_strength, weight);
                            let score = ctx.score() * (f64::from(propagated) + 1.0);
                            collector.add(elem, score, &self.name, Proximity::Degree2);
                            if collector.can_stop() {
                                break;
                            }
                        }
                        ctx.clear();
                    }
                }
            }

            if browsed % DEADLINE_POLL_EDGES == 0
                && start_time.elapsed().as_millis() as u64 > timeout_millis
            {
                break;
            }
        }

        stats.num_browse_hits += browsed;
        stats.num_filter_hits += filtered;
        stats.num_result_hits += results;
    }

    fn search_network_internal(
        &self,
        uid: u32,
        terms: &[&str],
        collector: &mut dyn Collector<E>,
        selector: &dyn Selector<E>,
        stats: &mut HitStats,
        context: &TypeaheadContext,
    ) {
        let timeout_millis = context.timeout_millis();
        let start_time = Instant::now();

        if !self.connections_store.has_index(uid) {
            return;
        }
        let Some(strengths) = context.strengths() else {
            return;
        };

        let query_mask = self.bloom.query_filter(terms);
        let mut uniq_ids = HashSet::with_capacity(256);

        // The network center is never a hit.
        uniq_ids.insert(context.source());

        // 1st degree over the context snapshot.
        self.apply_filter_arrays(
            query_mask,
            strengths.ids(),
            strengths.weights(),
            collector,
            selector,
            &mut uniq_ids,
            stats,
            timeout_millis,
        );
        if collector.can_stop() {
            return;
        }

        let elapsed = start_time.elapsed().as_millis() as u64;
        if elapsed >= timeout_millis {
            return;
        }
        let mut timeout = timeout_millis - elapsed;

        // 2nd degree: one scratch buffer reused across all neighbors.
        let mut buf = self.bytes_from_pool();
        for (&conn_id, &inherited) in strengths.ids().iter().zip(strengths.weights()) {
            match self.strength_iterator(conn_id, buf) {
                Ok(StrengthRead::Edges(mut iter)) => {
                    self.apply_filter_second_degree(
                        query_mask,
                        inherited,
                        &mut iter,
                        collector,
                        selector,
                        &mut uniq_ids,
                        stats,
                        timeout,
                    );
                    buf = iter.into_buffer();
                    if collector.can_stop() {
                        break;
                    }
                }
                Ok(StrengthRead::Empty(b)) => buf = b,
                Err(e) => {
                    // Partial results already collected stand.
                    warn!(
                        "{} adjacency read failed for connection {}: {}",
                        self.name, conn_id, e
                    );
                    return;
                }
            }

            let elapsed = start_time.elapsed().as_millis() as u64;
            if elapsed >= timeout_millis {
                break;
            }
            timeout = timeout_millis - elapsed;
        }
        self.recycle(buf);
    }

    fn log_query(&self, uid: u32, stats: &HitStats, terms: &[&str]) {
        info!(
            "{} user={} time={} hits={}|{}|{} terms={{{}}}",
            self.name,
            uid,
            stats.total_time_ms,
            stats.num_browse_hits,
            stats.num_filter_hits,
            stats.num_result_hits,
            terms.join(",")
        );
    }

    // ------------------------------------------------------------------
    // Index surface
    // ------------------------------------------------------------------

    /// Indexes an element, making it searchable. Returns `false` when the
    /// element id falls outside the shard's range.
    ///
    /// The filter store is updated before the element store so a
    /// concurrent reader sees either old element + old mask or new mask +
    /// old element; both are harmless, the selector re-checks.
    pub fn index_element(&self, element: E) -> Result<bool> {
        let elem_id = element.element_id();
        if !self.element_store.has_index(elem_id) {
            return Ok(false);
        }

        let _guard = self.element_lock.lock();

        let mask = index_mask(self.bloom.as_ref(), &element);
        let timestamp = element.timestamp();
        self.filter_store.set(elem_id, mask);
        self.element_store.set_element(elem_id, element, timestamp)?;

        debug!("{} indexed element {}", self.name, elem_id);
        Ok(true)
    }

    /// Indexes a connection update. Returns `false` when the connection
    /// filter rejects it. An active connection with strength 0 inherits
    /// the currently stored strength, if any.
    pub fn index_connection(&self, conn: &Connection) -> Result<bool> {
        if !self.accept(conn) {
            return Ok(false);
        }

        let _guard = self.connections_lock.lock();

        if conn.active {
            let mut strength = conn.strength;
            if strength == 0 && self.connections_store.has_index(conn.source) {
                strength = self.connections_store.get_weight(conn.source, conn.target);
            }
            self.connections_store
                .set_weight(conn.source, conn.target, strength, conn.timestamp)?;
        } else {
            self.connections_store
                .remove(conn.source, conn.target, conn.timestamp)?;
        }

        debug!("{} indexed connection {}", self.name, conn);
        Ok(true)
    }

    pub fn accept(&self, conn: &Connection) -> bool {
        self.conn_filter.accept(conn)
    }

    pub fn accept_edge(&self, source: u32, target: u32, active: bool) -> bool {
        self.conn_filter.accept_edge(source, target, active)
    }

    /// Persists both stores, each under its own lock.
    pub fn flush(&self) -> Result<()> {
        {
            let _guard = self.element_lock.lock();
            self.element_store.persist()?;
        }
        {
            let _guard = self.connections_lock.lock();
            self.connections_store.persist()?;
        }
        Ok(())
    }
}

/// Element-side bloom mask over the element's terms.
fn index_mask<E: Element>(bloom: &dyn TermBloom, element: &E) -> u32 {
    let terms: Vec<&str> = element.terms().iter().map(String::as_str).collect();
    bloom.index_filter(&terms)
}
