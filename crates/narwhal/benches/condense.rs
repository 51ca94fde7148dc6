use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::graph::visual::ensure_position;
use narwhal::graph::StoreGraph;
use narwhal::{CancellationToken, ComponentTaxonomy, TaxonomySource};
use std::hint::black_box;
use std::time::Duration;

/// `clusters` disjoint rings of `ring` vertices.
fn clustered_graph(clusters: usize, ring: usize) -> StoreGraph {
    let mut g = StoreGraph::new();
    let [x, y, _] = ensure_position(&mut g);
    for c in 0..clusters {
        for i in 0..ring {
            let v = g.add_vertex();
            g.set_float_value(x, v, (c * 10) as f64 + (i % 7) as f64);
            g.set_float_value(y, v, (i / 7) as f64);
        }
    }
    for c in 0..clusters {
        let base = c * ring;
        for i in 0..ring {
            g.add_transaction(base + i, base + (i + 1) % ring, true);
        }
    }
    g
}

/// Ties each ring to the next with `bridges` parallel transactions.
fn with_bridges(mut g: StoreGraph, clusters: usize, ring: usize, bridges: usize) -> StoreGraph {
    for c in 1..clusters {
        for b in 0..bridges {
            g.add_transaction((c - 1) * ring + b % ring, c * ring, true);
        }
    }
    g
}

fn bench_condense(c: &mut Criterion) {
    let mut group = c.benchmark_group("condense");
    group.measurement_time(Duration::from_secs(5));

    for &(clusters, ring) in &[(50usize, 20usize), (200, 20), (50, 200)] {
        let g = clustered_graph(clusters, ring);
        // Rings are components; keep them apart so each ring is its own taxon.
        let taxonomy = ComponentTaxonomy::new()
            .taxonomy(&g, &CancellationToken::new())
            .expect("not cancelled");
        let g = with_bridges(g, clusters, ring, 3);

        let id = format!("{clusters}x{ring}");
        group.bench_with_input(BenchmarkId::from_parameter(&id), &g, |b, g| {
            b.iter(|| {
                let condensation = taxonomy
                    .condense(black_box(g), &CancellationToken::new())
                    .expect("not cancelled");
                black_box(condensation.vertex_count())
            })
        });

        group.bench_with_input(BenchmarkId::new("reposition", &id), &g, |b, g| {
            let condensation = taxonomy
                .condense(g, &CancellationToken::new())
                .expect("not cancelled");
            b.iter_batched(
                || g.clone(),
                |mut target| {
                    taxonomy
                        .reposition(&mut target, &condensation, &CancellationToken::new())
                        .expect("not cancelled");
                    black_box(target)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_condense);
criterion_main!(benches);
