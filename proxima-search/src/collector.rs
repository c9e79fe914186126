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

//! Hit accumulation and top-K selection.
//!
//! The engine feeds every selector match to the collector and consults
//! `can_stop` after each add; the collector owns the stop condition and
//! the final ordering. `hits()` preserves insertion (traversal) order;
//! `elements()` is the score-ranked view.

use std::cmp::Ordering;
use std::sync::Arc;

use proxima_core::Element;

/// How a hit was reached from the query source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Proximity {
    /// Direct neighbor of the querying user.
    Degree1,
    /// Neighbor of a neighbor.
    Degree2,
}

/// One scored search result.
#[derive(Debug, Clone)]
pub struct Hit<E> {
    pub element: Arc<E>,
    pub score: f64,
    /// Name of the typeahead shard that produced the hit.
    pub source: String,
    pub proximity: Proximity,
}

/// Accumulator for selector matches.
pub trait Collector<E: Element> {
    fn add(&mut self, element: Arc<E>, score: f64, source: &str, proximity: Proximity);

    /// Whether the traversal may terminate early.
    fn can_stop(&self) -> bool;

    /// Collected hits in insertion order.
    fn hits(&self) -> &[Hit<E>];

    fn len(&self) -> usize {
        self.hits().len()
    }

    fn is_empty(&self) -> bool {
        self.hits().is_empty()
    }

    /// Elements ranked by descending score; ties keep insertion order.
    fn elements(&self) -> Vec<Arc<E>> {
        let mut ranked: Vec<&Hit<E>> = self.hits().iter().collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.iter().map(|h| Arc::clone(&h.element)).collect()
    }
}

/// Capacity-bounded collector: accepts the first `capacity` matches in
/// traversal order and stops the walk once full.
pub struct SimpleCollector<E> {
    capacity: usize,
    hits: Vec<Hit<E>>,
}

impl<E> SimpleCollector<E> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hits: Vec::with_capacity(capacity.min(64)),
        }
    }

    /// Collector without a capacity bound; the walk runs to exhaustion or
    /// deadline.
    pub fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<E: Element> Collector<E> for SimpleCollector<E> {
    fn add(&mut self, element: Arc<E>, score: f64, source: &str, proximity: Proximity) {
        if self.hits.len() < self.capacity {
            self.hits.push(Hit {
                element,
                score,
                source: source.to_string(),
                proximity,
            });
        }
    }

    fn can_stop(&self) -> bool {
        self.hits.len() >= self.capacity
    }

    fn hits(&self) -> &[Hit<E>] {
        &self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxima_core::TermElement;

    fn add(c: &mut SimpleCollector<TermElement>, id: u32, score: f64) {
        let e = Arc::new(TermElement::new(id, 0, vec!["t"]));
        c.add(e, score, "shard-0", Proximity::Degree1);
    }

    #[test]
    fn test_can_stop_at_capacity() {
        let mut c = SimpleCollector::new(3);
        for i in 0..3 {
            assert!(!c.can_stop());
            add(&mut c, i, 1.0);
        }
        assert!(c.can_stop());
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_add_beyond_capacity_ignored() {
        let mut c = SimpleCollector::new(1);
        add(&mut c, 1, 1.0);
        add(&mut c, 2, 9.0);
        assert_eq!(c.len(), 1);
        assert_eq!(c.hits()[0].element.element_id(), 1);
    }

    #[test]
    fn test_elements_ranked_by_score() {
        let mut c = SimpleCollector::unbounded();
        add(&mut c, 1, 0.5);
        add(&mut c, 2, 2.0);
        add(&mut c, 3, 1.0);
        let ids: Vec<u32> = c.elements().iter().map(|e| e.element_id()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_hits_preserve_insertion_order() {
        let mut c = SimpleCollector::unbounded();
        add(&mut c, 9, 0.1);
        add(&mut c, 4, 5.0);
        let ids: Vec<u32> = c.hits().iter().map(|h| h.element.element_id()).collect();
        assert_eq!(ids, vec![9, 4]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut c = SimpleCollector::unbounded();
        add(&mut c, 1, 1.0);
        add(&mut c, 2, 1.0);
        let ids: Vec<u32> = c.elements().iter().map(|e| e.element_id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_unbounded_never_stops() {
        let mut c = SimpleCollector::unbounded();
        for i in 0..1_000 {
            add(&mut c, i, 1.0);
        }
        assert!(!c.can_stop());
    }

    #[test]
    fn test_hit_carries_source_and_proximity() {
        let mut c = SimpleCollector::new(1);
        let e = Arc::new(TermElement::new(8, 0, vec!["x"]));
        c.add(e, 2.0, "people", Proximity::Degree2);
        let hit = &c.hits()[0];
        assert_eq!(hit.source, "people");
        assert_eq!(hit.proximity, Proximity::Degree2);
        assert_eq!(hit.score, 2.0);
    }
}
