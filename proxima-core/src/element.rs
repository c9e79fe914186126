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

//! Searchable element capability.
//!
//! The engine is parametric over the concrete element type: anything with a
//! stable id, a monotone timestamp, a term list and a baseline score can be
//! indexed and searched. The element store owns elements; the engine hands
//! out `Arc` snapshots per query and never mutates one in place.

use std::fmt;

/// Capability exposed by every searchable payload.
pub trait Element: Send + Sync + 'static {
    /// Stable integer id, unique within the shard's [`crate::IdRange`].
    fn element_id(&self) -> u32;

    /// Monotone update clock for last-writer-wins at the store.
    fn timestamp(&self) -> u64;

    /// Terms matched by the selector and summarized by the bloom prefilter.
    fn terms(&self) -> &[String];

    /// Baseline relevance score, combined with path strength at query time.
    fn score(&self) -> f64;
}

/// Minimal owned element: a term list with an id, timestamp and score.
#[derive(Debug, Clone, PartialEq)]
pub struct TermElement {
    element_id: u32,
    timestamp: u64,
    terms: Vec<String>,
    score: f64,
}

impl TermElement {
    /// Creates an element with a baseline score of 1.0.
    pub fn new<S: Into<String>>(element_id: u32, timestamp: u64, terms: Vec<S>) -> Self {
        Self {
            element_id,
            timestamp,
            terms: terms.into_iter().map(Into::into).collect(),
            score: 1.0,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

impl Element for TermElement {
    fn element_id(&self) -> u32 {
        self.element_id
    }

    fn timestamp(&self) -> u64 {
        self.timestamp
    }

    fn terms(&self) -> &[String] {
        &self.terms
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl fmt::Display for TermElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {{{}}}",
            self.element_id,
            self.timestamp,
            self.terms.join(",")
        )
    }
}
