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

//! Per-query hit counters.

use std::time::Instant;

/// Monotone counters accumulated over a single query.
///
/// `num_browse_hits` counts every edge browsed, `num_filter_hits` the
/// candidates surviving the bloom prefilter, `num_result_hits` the
/// selector matches delivered to the collector.
#[derive(Debug, Default, Clone)]
pub struct HitStats {
    pub num_browse_hits: u64,
    pub num_filter_hits: u64,
    pub num_result_hits: u64,
    /// Wall-clock time between `start()` and `stop()`, in milliseconds.
    pub total_time_ms: u64,
    started: Option<Instant>,
}

impl HitStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    pub fn stop(&mut self) {
        if let Some(t) = self.started.take() {
            self.total_time_ms = t.elapsed().as_millis() as u64;
        }
    }
}
