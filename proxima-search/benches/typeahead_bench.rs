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

//! Query-path throughput over synthetic neighborhoods.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use proxima_search::{
    AcceptAllConnectionFilter, Connection, FnvTermBloom, IdRange, MemoryConnectionsStore,
    MemoryElementStore, PrefixSelectorFactory, SimpleCollector, TermElement,
    WeightedNetworkTypeahead,
};

const NAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy",
];

fn build_engine(num_neighbors: u32) -> WeightedNetworkTypeahead<TermElement> {
    let engine = WeightedNetworkTypeahead::with_config(
        "bench",
        Arc::new(MemoryElementStore::new(IdRange::new(0, num_neighbors + 1))),
        Arc::new(MemoryConnectionsStore::new()),
        Box::new(PrefixSelectorFactory),
        Box::new(FnvTermBloom::default()),
        Box::new(AcceptAllConnectionFilter),
        Box::new(proxima_search::AdditiveWeightAdjuster),
        proxima_search::TypeaheadConfig {
            logging_enabled: false,
            ..Default::default()
        },
    );

    let user = num_neighbors;
    for id in 0..num_neighbors {
        let name = NAMES[id as usize % NAMES.len()];
        engine
            .index_element(TermElement::new(id, 1, vec![name]))
            .unwrap();
        let conn = Connection::new(user, id, true)
            .with_strength(id % 16)
            .with_timestamp(1);
        engine.index_connection(&conn).unwrap();
    }
    engine
}

fn bench_single_hop(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_hop_search");

    for num_neighbors in [1_000u32, 10_000] {
        let engine = build_engine(num_neighbors);
        let user = num_neighbors;

        group.bench_with_input(
            BenchmarkId::from_parameter(num_neighbors),
            &num_neighbors,
            |b, _| {
                b.iter(|| {
                    let results = engine.search_top(black_box(user), &["ali"], 10, u64::MAX);
                    black_box(results)
                })
            },
        );
    }
    group.finish();
}

fn bench_bloom_rejection(c: &mut Criterion) {
    // No element carries the query prefix: measures pure browse + mask cost.
    let engine = build_engine(10_000);
    let user = 10_000;

    c.bench_function("bloom_reject_10k_edges", |b| {
        b.iter(|| {
            let results = engine.search_top(black_box(user), &["zz"], 10, u64::MAX);
            black_box(results)
        })
    });
}

fn bench_two_hop(c: &mut Criterion) {
    let engine = build_engine(1_000);
    let user = 1_000;
    let context = engine.create_context(user);

    c.bench_function("two_hop_search_1k", |b| {
        b.iter(|| {
            let mut collector = SimpleCollector::new(10);
            engine.search_network(black_box(user), &["ali"], &mut collector, Some(&context));
            black_box(collector)
        })
    });
}

criterion_group!(benches, bench_single_hop, bench_bloom_rejection, bench_two_hop);
criterion_main!(benches);
