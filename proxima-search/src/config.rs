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

//! Engine tuning knobs.

/// Configuration for [`crate::WeightedNetworkTypeahead`].
#[derive(Debug, Clone)]
pub struct TypeaheadConfig {
    /// Maximum number of scratch buffers retained by the byte pool.
    pub bytes_pool_size: usize,

    /// Canonical scratch buffer size in bytes. Adjacency records larger
    /// than this force a one-off allocation that is never pooled.
    pub byte_array_size: usize,

    /// Emit the per-query summary log line.
    pub logging_enabled: bool,

    /// Use best-effort partial reads of adjacency bytes instead of full
    /// reads. A truncated edge list trades recall for latency.
    pub partial_read_enabled: bool,
}

impl TypeaheadConfig {
    pub const BYTES_POOL_SIZE_DEFAULT: usize = 100;
    pub const BYTE_ARRAY_SIZE_DEFAULT: usize = 1 << 15; // 32 KiB
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            bytes_pool_size: Self::BYTES_POOL_SIZE_DEFAULT,
            byte_array_size: Self::BYTE_ARRAY_SIZE_DEFAULT,
            logging_enabled: true,
            partial_read_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TypeaheadConfig::default();
        assert_eq!(config.bytes_pool_size, 100);
        assert_eq!(config.byte_array_size, 32 * 1024);
        assert!(config.logging_enabled);
        assert!(!config.partial_read_enabled);
    }
}
