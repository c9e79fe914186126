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

//! Error types for Proxima

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProximaError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),
}

pub type Result<T> = std::result::Result<T, ProximaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProximaError::Store("weights store offline".into());
        assert_eq!(err.to_string(), "Store error: weights store offline");

        let err = ProximaError::InvalidArgument("max_results must be >= 1".into());
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "truncated record");
        let err: ProximaError = io_err.into();
        assert!(matches!(err, ProximaError::Io(_)));
    }
}
