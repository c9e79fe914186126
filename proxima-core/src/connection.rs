// SPDX-License-Identifier: AGPL-3.0-or-later
// Proxima - Social Graph Typeahead Engine
// Copyright (C) 2026 Sushanth Reddy Vanagala (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Directed weighted edges of the affinity graph.
//!
//! A connection is an indexing instruction, not stored state: `active`
//! edges upsert into the adjacency store, inactive ones remove. A strength
//! of 0 on an active edge means "keep whatever strength is already stored".

use std::fmt;

use crate::range::IdRange;

/// A directed weighted edge `(source -> target, strength)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source: u32,
    pub target: u32,
    /// Edge weight; 0 inherits the currently stored strength on indexing.
    pub strength: u32,
    /// Causality clock; the store resolves conflicting writes by timestamp.
    pub timestamp: u64,
    /// `false` expresses removal of the edge.
    pub active: bool,
}

impl Connection {
    pub fn new(source: u32, target: u32, active: bool) -> Self {
        Self {
            source,
            target,
            strength: 0,
            timestamp: 0,
            active,
        }
    }

    pub fn with_strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}=>{} s={} {}",
            self.source,
            self.target,
            self.strength,
            if self.active { 'Y' } else { 'N' }
        )
    }
}

/// Admission control applied before a connection reaches the adjacency store.
pub trait ConnectionFilter: Send + Sync {
    fn accept(&self, conn: &Connection) -> bool {
        self.accept_edge(conn.source, conn.target, conn.active)
    }

    fn accept_edge(&self, source: u32, target: u32, active: bool) -> bool;

    /// Short description used in startup property listings.
    fn describe(&self) -> String;
}

/// Admits every connection.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllConnectionFilter;

impl ConnectionFilter for AcceptAllConnectionFilter {
    fn accept_edge(&self, _source: u32, _target: u32, _active: bool) -> bool {
        true
    }

    fn describe(&self) -> String {
        "accept-all".into()
    }
}

/// Admits only connections whose source falls inside the shard's range.
#[derive(Debug, Clone, Copy)]
pub struct SourceRangeConnectionFilter {
    range: IdRange,
}

impl SourceRangeConnectionFilter {
    pub fn new(range: IdRange) -> Self {
        Self { range }
    }
}

impl ConnectionFilter for SourceRangeConnectionFilter {
    fn accept_edge(&self, source: u32, _target: u32, _active: bool) -> bool {
        self.range.contains(source)
    }

    fn describe(&self) -> String {
        format!("source-range{}", self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_builders() {
        let conn = Connection::new(1, 2, true).with_strength(5).with_timestamp(99);
        assert_eq!(conn.source, 1);
        assert_eq!(conn.target, 2);
        assert_eq!(conn.strength, 5);
        assert_eq!(conn.timestamp, 99);
        assert!(conn.active);
    }

    #[test]
    fn test_accept_all() {
        let filter = AcceptAllConnectionFilter;
        assert!(filter.accept(&Connection::new(0, 0, false)));
        assert!(filter.accept_edge(u32::MAX, 0, true));
    }

    #[test]
    fn test_source_range_filter() {
        let filter = SourceRangeConnectionFilter::new(IdRange::new(10, 10));
        assert!(filter.accept(&Connection::new(10, 500, true)));
        assert!(filter.accept(&Connection::new(19, 500, false)));
        assert!(!filter.accept(&Connection::new(20, 500, true)));
        assert!(!filter.accept_edge(9, 500, true));
    }

    #[test]
    fn test_display() {
        let conn = Connection::new(3, 4, false).with_strength(2);
        assert_eq!(conn.to_string(), "3=>4 s=2 N");
    }
}
