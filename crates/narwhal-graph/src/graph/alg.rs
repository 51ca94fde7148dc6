//! Connectivity helpers.

use super::{StoreGraph, VertexId};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Weakly connected components, in vertex order of their first member.
pub fn components(g: &StoreGraph) -> Vec<Vec<VertexId>> {
    components_among(g, |_| true)
}

/// Weakly connected components of the subgraph induced by the vertices `include` accepts.
///
/// Each component starts with the vertex it was discovered from, followed by the rest in
/// breadth-first order.
pub fn components_among<F>(g: &StoreGraph, include: F) -> Vec<Vec<VertexId>>
where
    F: Fn(VertexId) -> bool,
{
    let mut seen: FxHashSet<VertexId> = FxHashSet::default();
    let mut out: Vec<Vec<VertexId>> = Vec::new();

    for start in g.vertices() {
        if !include(start) || !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<VertexId> = Vec::new();
        let mut q: VecDeque<VertexId> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            g.for_each_neighbour(v, |n| {
                if include(n) && seen.insert(n) {
                    q.push_back(n);
                }
            });
        }
        out.push(comp);
    }

    out
}

/// All vertices reachable from `seed`, the seed first.
pub fn component_containing(g: &StoreGraph, seed: VertexId) -> Vec<VertexId> {
    if !g.has_vertex(seed) {
        return Vec::new();
    }
    let mut seen: FxHashSet<VertexId> = FxHashSet::default();
    let mut comp: Vec<VertexId> = Vec::new();
    let mut q: VecDeque<VertexId> = VecDeque::new();
    seen.insert(seed);
    q.push_back(seed);
    while let Some(v) = q.pop_front() {
        comp.push(v);
        g.for_each_neighbour(v, |n| {
            if seen.insert(n) {
                q.push_back(n);
            }
        });
    }
    comp
}
