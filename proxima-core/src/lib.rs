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

//! Proxima Core
//!
//! Shared domain types for the Proxima typeahead engine:
//!
//! - [`Element`]: the capability every searchable payload exposes
//!   (stable id, timestamp, terms, baseline score)
//! - [`Connection`]: a directed weighted edge in the affinity graph
//! - [`ConnectionFilter`]: admission control for connection indexing
//! - [`IdRange`]: the half-open element-id partition owned by one shard
//! - [`ProximaError`] / [`Result`]: the crate-wide error type

pub mod connection;
pub mod element;
pub mod error;
pub mod range;

pub use connection::{
    AcceptAllConnectionFilter, Connection, ConnectionFilter, SourceRangeConnectionFilter,
};
pub use element::{Element, TermElement};
pub use error::{ProximaError, Result};
pub use range::IdRange;
